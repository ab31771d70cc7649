//! Edge-definition files: a non-interactive source of [`RawEdgeInput`] records.
//!
//! ```toml
//! [[edges]]
//! name = "chemical-gene"
//! data_types = "class-class"
//! relation = "RO_0002434"
//! # ...
//! ontologies = [{ name = "chemical", url = "http://purl.obolibrary.org/obo/chebi.owl" }]
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use depdocs_shared::{DepDocsError, RawEdgeInput, Result};

#[derive(Debug, Deserialize)]
struct EdgeInputFile {
    #[serde(default)]
    edges: Vec<RawEdgeInput>,
}

/// Parse `[[edges]]` tables, preserving declaration order.
pub fn parse_edge_inputs(content: &str) -> Result<Vec<RawEdgeInput>> {
    decode_edges(content)
        .map_err(|e| DepDocsError::validation(format!("invalid edge definitions: {e}")))
}

/// Load edge definitions from a TOML file.
pub fn load_edge_inputs(path: &Path) -> Result<Vec<RawEdgeInput>> {
    let content = std::fs::read_to_string(path).map_err(|e| DepDocsError::io(path, e))?;
    let edges = decode_edges(&content).map_err(|e| {
        DepDocsError::validation(format!("invalid edge definitions in {}: {e}", path.display()))
    })?;
    debug!(path = %path.display(), count = edges.len(), "loaded edge definitions");
    Ok(edges)
}

fn decode_edges(content: &str) -> std::result::Result<Vec<RawEdgeInput>, toml::de::Error> {
    toml::from_str::<EdgeInputFile>(content).map(|file| file.edges)
}
