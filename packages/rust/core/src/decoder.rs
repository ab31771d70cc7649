//! Consumer-side decoding of the generated documents.
//!
//! This is the inverse of [`crate::encoder`]: the same grammar validators are
//! applied to each split field, so anything the encoder emits decodes back to
//! an equal [`EdgeDescriptor`].

use std::path::Path;

use serde::Serialize;
use tracing::{debug, instrument};

use depdocs_shared::{DepDocsError, EdgeDescriptor, Result};

use crate::grammar::{self, DESCRIPTOR_FIELD_COUNT, FIELD_DELIMITER, SOURCE_LIST_DELIMITER};

/// One decoded `resource_info.txt` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceEntry {
    pub edge: String,
    pub descriptor: EdgeDescriptor,
}

/// Decode the ten `|`-separated descriptor fields.
pub fn decode_descriptor(fields_line: &str) -> Result<EdgeDescriptor> {
    let fields: Vec<&str> = fields_line.split(FIELD_DELIMITER).collect();
    let [
        source_labels,
        data_types,
        relation,
        subject_uri,
        object_uri,
        column_delimiter,
        column_indices,
        identifier_maps,
        evidence_criteria,
        filter_criteria,
    ] = fields.as_slice()
    else {
        return Err(DepDocsError::malformed_descriptor(format!(
            "expected {DESCRIPTOR_FIELD_COUNT} '|'-separated fields, found {}",
            fields.len()
        )));
    };

    Ok(EdgeDescriptor {
        source_labels: grammar::validate_source_label_rule(source_labels)?,
        data_types: grammar::validate_data_type_pair(data_types)?,
        relation: grammar::validate_opaque_field("relation", relation)?,
        subject_uri: grammar::validate_opaque_field("subject_uri", subject_uri)?,
        object_uri: grammar::validate_opaque_field("object_uri", object_uri)?,
        column_delimiter: grammar::validate_column_delimiter(column_delimiter)?,
        column_indices: grammar::validate_column_index_pair(column_indices)?,
        identifier_maps: grammar::validate_identifier_mapping_list(identifier_maps)?,
        evidence_criteria: grammar::validate_criterion_list(evidence_criteria)?,
        filter_criteria: grammar::validate_criterion_list(filter_criteria)?,
    })
}

/// Decode a full `<edge>|<descriptor>` line.
pub fn parse_resource_line(line: &str) -> Result<ResourceEntry> {
    let (edge, rest) = line.split_once(FIELD_DELIMITER).ok_or_else(|| {
        DepDocsError::malformed_descriptor(format!("no '|' after edge name in '{line}'"))
    })?;
    grammar::validate_edge_name(edge)?;

    let descriptor =
        decode_descriptor(rest).map_err(|e| DepDocsError::for_edge(edge, e))?;

    Ok(ResourceEntry {
        edge: edge.to_string(),
        descriptor,
    })
}

/// Split a `<name>, <value>` source list line on the first `", "`.
pub fn parse_source_line(line: &str) -> Result<(String, String)> {
    let (name, value) = line.split_once(SOURCE_LIST_DELIMITER).ok_or_else(|| {
        DepDocsError::validation(format!("expected '<name>, <value>', got '{line}'"))
    })?;
    if name.is_empty() || value.is_empty() {
        return Err(DepDocsError::validation(format!(
            "empty name or value in '{line}'"
        )));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Read and decode every line of a `resource_info.txt` file.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_resource_info(path: &Path) -> Result<Vec<ResourceEntry>> {
    let content = std::fs::read_to_string(path).map_err(|e| DepDocsError::io(path, e))?;

    let entries = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_resource_line)
        .collect::<Result<Vec<_>>>()?;

    debug!(count = entries.len(), "decoded resource info");
    Ok(entries)
}

/// Read an ontology or edge source list.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_source_list(path: &Path) -> Result<Vec<(String, String)>> {
    let content = std::fs::read_to_string(path).map_err(|e| DepDocsError::io(path, e))?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_source_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use depdocs_shared::{
        ColumnIndexPair, Criterion, DataTypePair, IdentifierMapping, NodeKind, SourceLabelRule,
    };

    use super::*;

    const CHEMICAL_GENE: &str = "chemical-gene|;MESH_;|class-class|RO_0002434|\
        http://purl.obolibrary.org/obo/|http://purl.uniprot.org/geneid/|\t|1;4|\
        0:./resources/data_maps/MESH_CHEBI_MAP.txt|None|7;==;9606";

    fn descriptors() -> Vec<EdgeDescriptor> {
        let base = EdgeDescriptor {
            source_labels: SourceLabelRule::default(),
            data_types: DataTypePair {
                subject: NodeKind::Entity,
                object: NodeKind::Class,
            },
            relation: "RO_0003302".into(),
            subject_uri: "http://www.ncbi.nlm.nih.gov/gene/".into(),
            object_uri: "http://purl.obolibrary.org/obo/".into(),
            column_delimiter: "\\t".into(),
            column_indices: ColumnIndexPair {
                subject: 0,
                object: 3,
            },
            identifier_maps: vec![],
            evidence_criteria: vec![],
            filter_criteria: vec![],
        };

        let mut full = base.clone();
        full.source_labels = SourceLabelRule {
            split_char: ":".into(),
            subject_replacement: "GO_".into(),
            object_replacement: "HP_".into(),
        };
        full.identifier_maps = vec![
            IdentifierMapping {
                column: 0,
                path: "./maps/gene.txt".into(),
            },
            IdentifierMapping {
                column: 3,
                path: "C:/maps/hp.txt".into(),
            },
        ];
        full.evidence_criteria = vec![
            Criterion {
                column: 4,
                operator: "!=".into(),
                value: "IEA".into(),
            },
            Criterion {
                column: 8,
                operator: "<".into(),
                value: "0.0001".into(),
            },
        ];
        full.filter_criteria = vec![Criterion {
            column: 3,
            operator: ".startswith(\"9606.\")".into(),
            value: String::new(),
        }];

        vec![base, full]
    }

    #[test]
    fn decode_inverts_display() {
        for descriptor in descriptors() {
            let line = descriptor.to_string();
            assert_eq!(decode_descriptor(&line).unwrap(), descriptor, "line: {line}");
        }
    }

    #[test]
    fn none_decodes_to_empty_list() {
        let line = descriptors()[0].to_string();
        let decoded = decode_descriptor(&line).unwrap();
        assert!(decoded.identifier_maps.is_empty());
        assert!(decoded.evidence_criteria.is_empty());
        assert!(decoded.filter_criteria.is_empty());
    }

    #[test]
    fn parses_reference_line() {
        let entry = parse_resource_line(CHEMICAL_GENE).unwrap();
        assert_eq!(entry.edge, "chemical-gene");
        assert_eq!(entry.descriptor.source_labels.subject_replacement, "MESH_");
        assert_eq!(entry.descriptor.column_delimiter, "\t");
        assert_eq!(entry.descriptor.identifier_maps[0].column, 0);
        assert_eq!(entry.descriptor.filter_criteria[0].column, 7);
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        let err = decode_descriptor(";;|class-class|RO_1").unwrap_err();
        assert!(matches!(err, DepDocsError::MalformedDescriptor { .. }));

        let err = parse_resource_line("chemical-gene").unwrap_err();
        assert!(matches!(err, DepDocsError::MalformedDescriptor { .. }));
    }

    #[test]
    fn decode_errors_carry_edge_name() {
        let line = CHEMICAL_GENE.replace("class-class", "class-foo");
        let err = parse_resource_line(&line).unwrap_err();
        assert!(err.to_string().contains("chemical-gene"));
        assert!(matches!(err.root(), DepDocsError::InvalidNodeKind { .. }));
    }

    #[test]
    fn source_line_splits_on_first_separator() {
        let (name, url) =
            parse_source_line("chemical, http://purl.obolibrary.org/obo/chebi.owl").unwrap();
        assert_eq!(name, "chemical");
        assert_eq!(url, "http://purl.obolibrary.org/obo/chebi.owl");

        assert!(parse_source_line("chemical,http://x").is_err());
    }
}
