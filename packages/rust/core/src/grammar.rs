//! Descriptor line grammar.
//!
//! A `resource_info.txt` line is `<edge>|<descriptor>`, where the descriptor
//! holds ten `|`-separated fields:
//!
//! ```text
//! sourceLabels|dataTypes|relation|subjectURI|objectURI|delimiter|colIdx|idMaps|evidence|filter
//! ```
//!
//! Nested sub-grammars:
//! - source labels: `<splitChar>;<subjectRepl>;<objectRepl>` (e.g. `:;GO_;GO_`)
//! - data types: `<kind>-<kind>`, each `class` or `entity`
//! - column indices: `<subjectCol>;<objectCol>`
//! - identifier maps: `None` | `<col>:<path>` | `<col>:<path>;<col>:<path>`
//! - criteria: `None` | `<col>;<op>;<value>` repeated, joined by `::`
//!
//! There is no escaping: values containing a delimiter of the level they sit
//! in are rejected rather than quoted.

use std::sync::LazyLock;

use regex::Regex;

use depdocs_shared::{
    ColumnIndexPair, Criterion, DataTypePair, DepDocsError, IdentifierMapping, NodeKind, Result,
    SourceLabelRule,
};

// ---------------------------------------------------------------------------
// Delimiters and sentinels
// ---------------------------------------------------------------------------

pub use depdocs_shared::types::{
    FIELD_DELIMITER, GROUP_DELIMITER, MAPPING_DELIMITER, NODE_KIND_DELIMITER, NONE_SENTINEL,
    PART_DELIMITER, SOURCE_LIST_DELIMITER,
};

/// Number of `|`-separated fields in a descriptor (edge name excluded).
pub const DESCRIPTOR_FIELD_COUNT: usize = 10;
/// One mapping per edge endpoint at most.
pub const MAX_IDENTIFIER_MAPPINGS: usize = 2;
const SOURCE_LABEL_PARTS: usize = 3;
const CRITERION_PARTS: usize = 3;

/// `<subject>-<object>`, no whitespace or field delimiter.
static EDGE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^|\s]+-[^|\s]+$").expect("edge name regex"));

// ---------------------------------------------------------------------------
// Sub-grammar validators
// ---------------------------------------------------------------------------

/// Parse a `;`-joined source label rule of up to three parts.
///
/// Missing trailing parts are padded with empty strings; empty input yields
/// the no-relabel default.
pub fn validate_source_label_rule(raw: &str) -> Result<SourceLabelRule> {
    if raw.is_empty() {
        return Ok(SourceLabelRule::default());
    }

    let parts: Vec<&str> = raw.split(PART_DELIMITER).collect();
    if parts.len() > SOURCE_LABEL_PARTS {
        return Err(DepDocsError::MalformedRule {
            raw: raw.to_string(),
            message: format!("expected at most 3 ';'-separated parts, found {}", parts.len()),
        });
    }

    let split_char = parts[0];
    if split_char.chars().count() > 1 {
        return Err(DepDocsError::MalformedRule {
            raw: raw.to_string(),
            message: format!("split character '{split_char}' must be a single character"),
        });
    }

    let part = |i: usize| parts.get(i).copied().unwrap_or_default().to_string();
    Ok(SourceLabelRule {
        split_char: split_char.to_string(),
        subject_replacement: part(1),
        object_replacement: part(2),
    })
}

/// Parse `<kind>-<kind>`, splitting on the first `-`.
pub fn validate_data_type_pair(raw: &str) -> Result<DataTypePair> {
    let (subject, object) =
        raw.split_once(NODE_KIND_DELIMITER)
            .ok_or_else(|| DepDocsError::InvalidNodeKind {
                raw: raw.to_string(),
                message: "expected '<kind>-<kind>'".into(),
            })?;

    Ok(DataTypePair {
        subject: parse_node_kind(raw, subject)?,
        object: parse_node_kind(raw, object)?,
    })
}

fn parse_node_kind(raw: &str, kind: &str) -> Result<NodeKind> {
    match kind {
        "class" => Ok(NodeKind::Class),
        "entity" => Ok(NodeKind::Entity),
        other => Err(DepDocsError::InvalidNodeKind {
            raw: raw.to_string(),
            message: format!("'{other}' is not 'class' or 'entity'"),
        }),
    }
}

/// Parse `<subjectCol>;<objectCol>` into two non-negative integers.
pub fn validate_column_index_pair(raw: &str) -> Result<ColumnIndexPair> {
    let invalid = |message: String| DepDocsError::InvalidColumnIndex {
        raw: raw.to_string(),
        message,
    };

    let parts: Vec<&str> = raw.split(PART_DELIMITER).collect();
    let [subject, object] = parts.as_slice() else {
        return Err(invalid(format!(
            "expected exactly 2 ';'-separated indices, found {}",
            parts.len()
        )));
    };

    let parse = |s: &str| {
        parse_column(s).ok_or_else(|| invalid(format!("'{s}' is not a non-negative integer")))
    };

    Ok(ColumnIndexPair {
        subject: parse(*subject)?,
        object: parse(*object)?,
    })
}

/// Parse evidence or filter criteria: `None`, or `col;op;value` groups joined by `::`.
pub fn validate_criterion_list(raw: &str) -> Result<Vec<Criterion>> {
    if is_absent(raw) {
        return Ok(Vec::new());
    }

    raw.split(GROUP_DELIMITER)
        .map(|group| {
            let malformed = |message: String| DepDocsError::MalformedCriterion {
                raw: raw.to_string(),
                message,
            };

            let parts: Vec<&str> = group.split(PART_DELIMITER).collect();
            let [column, operator, value] = parts.as_slice() else {
                return Err(malformed(format!(
                    "group '{group}' has {} parts, expected {CRITERION_PARTS} ('col;op;value')",
                    parts.len()
                )));
            };

            let column = parse_column(column)
                .ok_or_else(|| malformed(format!("column '{column}' is not an integer")))?;

            Ok(Criterion {
                column,
                operator: (*operator).to_string(),
                value: (*value).to_string(),
            })
        })
        .collect()
}

/// Parse identifier maps: `None`, or up to two `col:path` groups joined by `;`.
pub fn validate_identifier_mapping_list(raw: &str) -> Result<Vec<IdentifierMapping>> {
    if is_absent(raw) {
        return Ok(Vec::new());
    }

    let invalid = |message: String| DepDocsError::InvalidMapping {
        raw: raw.to_string(),
        message,
    };

    let groups: Vec<&str> = raw.split(PART_DELIMITER).collect();
    if groups.len() > MAX_IDENTIFIER_MAPPINGS {
        return Err(invalid(format!(
            "at most {MAX_IDENTIFIER_MAPPINGS} mappings allowed, found {}",
            groups.len()
        )));
    }

    groups
        .into_iter()
        .map(|group| {
            let (column, path) = group
                .split_once(MAPPING_DELIMITER)
                .ok_or_else(|| invalid(format!("group '{group}' is not 'col:path'")))?;
            let column = parse_column(column)
                .ok_or_else(|| invalid(format!("column '{column}' is not an integer")))?;
            if path.is_empty() {
                return Err(invalid(format!("group '{group}' has an empty path")));
            }
            Ok(IdentifierMapping {
                column,
                path: path.to_string(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scalar fields
// ---------------------------------------------------------------------------

/// A single character, or a two-character backslash escape such as `\t`.
pub fn validate_column_delimiter(raw: &str) -> Result<String> {
    check_reserved("column_delimiter", raw)?;

    let mut chars = raw.chars();
    let valid = match (chars.next(), chars.next(), chars.next()) {
        (Some(_), None, None) => true,
        (Some('\\'), Some(_), None) => true,
        _ => false,
    };

    if valid {
        Ok(raw.to_string())
    } else {
        Err(DepDocsError::InvalidColumnDelimiter {
            raw: raw.to_string(),
        })
    }
}

/// Non-empty opaque value (relation, URIs). Only delimiter safety is checked.
pub fn validate_opaque_field(field: &'static str, raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(DepDocsError::MissingField { field });
    }
    check_reserved(field, raw)?;
    Ok(raw.to_string())
}

/// Edge names must look like `<subject>-<object>`.
pub fn validate_edge_name(name: &str) -> Result<()> {
    if EDGE_NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(DepDocsError::InvalidEdgeName {
            name: name.to_string(),
        })
    }
}

/// Key or value of a `", "`-delimited source list line.
pub fn validate_document_key(field: &'static str, key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(DepDocsError::MissingField { field });
    }
    if key.contains(SOURCE_LIST_DELIMITER) {
        return Err(DepDocsError::ReservedDelimiter {
            field,
            delimiter: SOURCE_LIST_DELIMITER,
            value: key.to_string(),
        });
    }
    check_line_safe(field, key)
}

/// Reject values containing the top-level `|` or a line break.
pub fn check_reserved(field: &'static str, value: &str) -> Result<()> {
    if value.contains(FIELD_DELIMITER) {
        return Err(DepDocsError::ReservedDelimiter {
            field,
            delimiter: "|",
            value: value.to_string(),
        });
    }
    check_line_safe(field, value)
}

pub(crate) fn check_line_safe(field: &'static str, value: &str) -> Result<()> {
    if value.contains(['\n', '\r']) {
        return Err(DepDocsError::ReservedDelimiter {
            field,
            delimiter: "newline",
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Plain ASCII digits only; `str::parse` would also accept a leading `+`.
fn parse_column(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn is_absent(raw: &str) -> bool {
    raw.is_empty() || raw == NONE_SENTINEL
}
