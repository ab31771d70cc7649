//! Core domain types for dependency documents.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Delimiters and sentinels
// ---------------------------------------------------------------------------

/// Separates the top-level descriptor fields (and the edge name).
pub const FIELD_DELIMITER: char = '|';
/// Separates parts within a group (labels, indices, criterion, mapping groups).
pub const PART_DELIMITER: char = ';';
/// Separates criterion groups.
pub const GROUP_DELIMITER: &str = "::";
/// Separates column from path inside an identifier mapping.
pub const MAPPING_DELIMITER: char = ':';
/// Separates the two node kinds.
pub const NODE_KIND_DELIMITER: char = '-';
/// Separates name and value in the ontology and edge source lists.
pub const SOURCE_LIST_DELIMITER: &str = ", ";
/// Literal written for an empty list field.
pub const NONE_SENTINEL: &str = "None";

// ---------------------------------------------------------------------------
// NodeKind
// ---------------------------------------------------------------------------

/// Classification of an edge endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Ontology-backed node.
    Class,
    /// Plain (non-ontology) node.
    Entity,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Entity => "entity",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Descriptor components
// ---------------------------------------------------------------------------

/// How existing source labels are rewritten (e.g. `GO:123` → `GO_123`).
///
/// The all-empty rule means "no relabeling".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLabelRule {
    /// Character used to split existing labels; empty or a single char.
    pub split_char: String,
    /// New label prefix for the subject node.
    pub subject_replacement: String,
    /// New label prefix for the object node.
    pub object_replacement: String,
}

impl fmt::Display for SourceLabelRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{PART_DELIMITER}{}{PART_DELIMITER}{}",
            self.split_char, self.subject_replacement, self.object_replacement
        )
    }
}

/// Node kinds of the subject and object endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTypePair {
    pub subject: NodeKind,
    pub object: NodeKind,
}

impl DataTypePair {
    /// Number of ontology-backed endpoints (0, 1, or 2).
    pub fn class_count(&self) -> usize {
        [self.subject, self.object]
            .iter()
            .filter(|k| **k == NodeKind::Class)
            .count()
    }
}

impl fmt::Display for DataTypePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{NODE_KIND_DELIMITER}{}", self.subject, self.object)
    }
}

/// Column positions of the subject and object in the raw data rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnIndexPair {
    pub subject: usize,
    pub object: usize,
}

impl fmt::Display for ColumnIndexPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{PART_DELIMITER}{}", self.subject, self.object)
    }
}

/// A column whose identifiers must be mapped through a mapping file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierMapping {
    pub column: usize,
    pub path: String,
}

impl fmt::Display for IdentifierMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{MAPPING_DELIMITER}{}", self.column, self.path)
    }
}

/// A `(column, operator, value)` row filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub column: usize,
    pub operator: String,
    pub value: String,
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{PART_DELIMITER}{}{PART_DELIMITER}{}",
            self.column, self.operator, self.value
        )
    }
}

/// Fully validated construction metadata for one edge type.
///
/// `Display` renders the canonical ten-field `|`-joined line, edge name
/// excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDescriptor {
    pub source_labels: SourceLabelRule,
    pub data_types: DataTypePair,
    /// Relation Ontology identifier (e.g. `RO_0002434`).
    pub relation: String,
    pub subject_uri: String,
    pub object_uri: String,
    pub column_delimiter: String,
    pub column_indices: ColumnIndexPair,
    /// At most two entries, one per endpoint.
    pub identifier_maps: Vec<IdentifierMapping>,
    pub evidence_criteria: Vec<Criterion>,
    pub filter_criteria: Vec<Criterion>,
}

impl fmt::Display for EdgeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = FIELD_DELIMITER;
        write!(f, "{}{d}{}{d}", self.source_labels, self.data_types)?;
        write!(f, "{}{d}{}{d}{}{d}", self.relation, self.subject_uri, self.object_uri)?;
        write!(f, "{}{d}{}{d}", self.column_delimiter, self.column_indices)?;
        write_list(f, &self.identifier_maps, &PART_DELIMITER.to_string())?;
        write!(f, "{d}")?;
        write_list(f, &self.evidence_criteria, GROUP_DELIMITER)?;
        write!(f, "{d}")?;
        write_list(f, &self.filter_criteria, GROUP_DELIMITER)
    }
}

/// `None` when empty, otherwise the items joined by `separator`.
fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    separator: &str,
) -> fmt::Result {
    if items.is_empty() {
        return f.write_str(NONE_SENTINEL);
    }
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Collection boundary
// ---------------------------------------------------------------------------

/// An ontology node name and the OWL/OBO URL it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologySource {
    pub name: String,
    pub url: String,
}

/// Unvalidated answers collected for one edge.
///
/// Produced by the interactive session or loaded from an edge-definition
/// TOML file. Every descriptor field is kept as the raw string the operator
/// supplied; validation happens at encode time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEdgeInput {
    /// Edge type, `<subject>-<object>` (e.g. `gene-protein`).
    pub name: String,
    #[serde(default)]
    pub source_labels: String,
    #[serde(default)]
    pub data_types: String,
    #[serde(default)]
    pub relation: String,
    #[serde(default)]
    pub subject_uri: String,
    #[serde(default)]
    pub object_uri: String,
    #[serde(default)]
    pub column_delimiter: String,
    #[serde(default)]
    pub column_indices: String,
    #[serde(default)]
    pub identifier_maps: String,
    #[serde(default)]
    pub evidence_criteria: String,
    #[serde(default)]
    pub filter_criteria: String,
    /// URL or file path of the raw edge data.
    #[serde(default)]
    pub source: String,
    /// Ontologies backing the `class` endpoints of this edge.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ontologies: Vec<OntologySource>,
}
