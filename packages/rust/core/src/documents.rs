//! In-memory accumulation of the three dependency documents.

use tracing::{debug, warn};

use depdocs_shared::{DepDocsError, RawEdgeInput, Result};

use crate::encoder;
use crate::grammar;

/// Insertion-ordered name → value map.
///
/// Re-inserting an existing name replaces its value but keeps its original
/// position (last write wins, no merge).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSet {
    entries: Vec<(String, String)>,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, returning the previous value if the name existed.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for DocumentSet {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

/// The three documents built from a collection session.
#[derive(Debug, Clone, Default)]
pub struct DependencyDocuments {
    /// Edge name → encoded descriptor (`resource_info.txt`).
    pub resources: DocumentSet,
    /// Ontology name → OWL/OBO URL (`ontology_source_list.txt`).
    pub ontologies: DocumentSet,
    /// Edge name → data location (`edge_source_list.txt`).
    pub edge_sources: DocumentSet,
}

impl DependencyDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and encode one edge, then record it in all three documents.
    ///
    /// Everything is validated before anything is inserted, so a failing
    /// edge leaves the accumulator untouched.
    pub fn record_edge(&mut self, raw: &RawEdgeInput) -> Result<()> {
        grammar::validate_edge_name(&raw.name)?;

        let descriptor = encoder::encode_descriptor(raw)?;

        let expected = descriptor.data_types.class_count();
        let declared = raw.ontologies.len();
        if declared != expected {
            return Err(DepDocsError::OntologyCountMismatch { declared, expected });
        }
        for ontology in &raw.ontologies {
            grammar::validate_document_key("ontology_name", &ontology.name)?;
            grammar::validate_document_key("ontology_url", &ontology.url)?;
        }
        grammar::validate_document_key("source", &raw.source)?;

        let line = descriptor.to_string();
        if self.resources.insert(&raw.name, line).is_some() {
            warn!(edge = %raw.name, "edge declared more than once, keeping the last definition");
        }
        for ontology in &raw.ontologies {
            if let Some(previous) = self.ontologies.insert(&ontology.name, &ontology.url) {
                if previous != ontology.url {
                    warn!(ontology = %ontology.name, %previous, url = %ontology.url, "ontology URL replaced");
                }
            }
        }
        self.edge_sources.insert(&raw.name, &raw.source);

        debug!(edge = %raw.name, ontologies = raw.ontologies.len(), "edge recorded");
        Ok(())
    }
}
