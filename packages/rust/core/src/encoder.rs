//! Descriptor encoder: raw edge answers → validated [`EdgeDescriptor`].
//!
//! The canonical line is the descriptor's `Display` output.

use tracing::{debug, instrument};

use depdocs_shared::{EdgeDescriptor, RawEdgeInput, Result};

use crate::grammar;

/// Validate every descriptor field of one edge.
///
/// Fails with the error kind of the first violated sub-grammar; no partial
/// descriptor is ever produced.
#[instrument(skip_all, fields(edge = %raw.name))]
pub fn encode_descriptor(raw: &RawEdgeInput) -> Result<EdgeDescriptor> {
    grammar::check_reserved("source_labels", &raw.source_labels)?;
    grammar::check_reserved("identifier_maps", &raw.identifier_maps)?;
    grammar::check_reserved("evidence_criteria", &raw.evidence_criteria)?;
    grammar::check_reserved("filter_criteria", &raw.filter_criteria)?;

    let descriptor = EdgeDescriptor {
        source_labels: grammar::validate_source_label_rule(&raw.source_labels)?,
        data_types: grammar::validate_data_type_pair(&raw.data_types)?,
        relation: grammar::validate_opaque_field("relation", &raw.relation)?,
        subject_uri: grammar::validate_opaque_field("subject_uri", &raw.subject_uri)?,
        object_uri: grammar::validate_opaque_field("object_uri", &raw.object_uri)?,
        column_delimiter: grammar::validate_column_delimiter(&raw.column_delimiter)?,
        column_indices: grammar::validate_column_index_pair(&raw.column_indices)?,
        identifier_maps: grammar::validate_identifier_mapping_list(&raw.identifier_maps)?,
        evidence_criteria: grammar::validate_criterion_list(&raw.evidence_criteria)?,
        filter_criteria: grammar::validate_criterion_list(&raw.filter_criteria)?,
    };

    debug!("descriptor validated");
    Ok(descriptor)
}

/// Validate and render in one step.
pub fn encode_descriptor_line(raw: &RawEdgeInput) -> Result<String> {
    encode_descriptor(raw).map(|d| d.to_string())
}

#[cfg(test)]
mod tests {
    use depdocs_shared::{DepDocsError, NodeKind};

    use super::*;
    use crate::grammar::DESCRIPTOR_FIELD_COUNT;

    fn chemical_gene() -> RawEdgeInput {
        RawEdgeInput {
            name: "chemical-gene".into(),
            source_labels: ";MESH_;".into(),
            data_types: "class-class".into(),
            relation: "RO_0002434".into(),
            subject_uri: "http://purl.obolibrary.org/obo/".into(),
            object_uri: "http://purl.uniprot.org/geneid/".into(),
            column_delimiter: "\t".into(),
            column_indices: "1;4".into(),
            identifier_maps: "0:./resources/data_maps/MESH_CHEBI_MAP.txt".into(),
            evidence_criteria: "None".into(),
            filter_criteria: "7;==;9606".into(),
            source: "http://ctdbase.org/reports/CTD_chem_gene_ixns.tsv.gz".into(),
            ontologies: vec![],
        }
    }

    #[test]
    fn encodes_chemical_gene_exactly() {
        let line = encode_descriptor_line(&chemical_gene()).unwrap();
        assert_eq!(
            line,
            ";MESH_;|class-class|RO_0002434|http://purl.obolibrary.org/obo/|\
             http://purl.uniprot.org/geneid/|\t|1;4|\
             0:./resources/data_maps/MESH_CHEBI_MAP.txt|None|7;==;9606"
        );
    }

    #[test]
    fn field_count_is_fixed() {
        let mut raw = chemical_gene();
        raw.evidence_criteria = "4;!=;IEA::8;<;0.0001".into();
        raw.identifier_maps = "0:./a.txt;1:./b.txt".into();
        let line = encode_descriptor_line(&raw).unwrap();
        assert_eq!(line.split('|').count(), DESCRIPTOR_FIELD_COUNT);

        let minimal = RawEdgeInput {
            name: "gene-gene".into(),
            data_types: "entity-entity".into(),
            relation: "RO_0002435".into(),
            subject_uri: "http://www.ncbi.nlm.nih.gov/gene/".into(),
            object_uri: "http://www.ncbi.nlm.nih.gov/gene/".into(),
            column_delimiter: ",".into(),
            column_indices: "0;1".into(),
            ..Default::default()
        };
        let line = encode_descriptor_line(&minimal).unwrap();
        assert_eq!(line.split('|').count(), DESCRIPTOR_FIELD_COUNT);
    }

    #[test]
    fn empty_lists_encode_as_sentinel() {
        let mut raw = chemical_gene();
        raw.identifier_maps = String::new();
        raw.evidence_criteria = String::new();
        raw.filter_criteria = "None".into();

        let line = encode_descriptor_line(&raw).unwrap();
        let fields: Vec<&str> = line.split('|').collect();
        assert_eq!(&fields[7..], &["None", "None", "None"]);
    }

    #[test]
    fn empty_source_labels_encode_as_no_relabel() {
        let mut raw = chemical_gene();
        raw.source_labels = String::new();
        let line = encode_descriptor_line(&raw).unwrap();
        assert!(line.starts_with(";;|class-class|"));
    }

    #[test]
    fn descriptor_fields_are_typed() {
        let descriptor = encode_descriptor(&chemical_gene()).unwrap();
        assert_eq!(descriptor.data_types.subject, NodeKind::Class);
        assert_eq!(descriptor.column_indices.object, 4);
        assert_eq!(descriptor.identifier_maps.len(), 1);
        assert!(descriptor.evidence_criteria.is_empty());
        assert_eq!(descriptor.filter_criteria[0].value, "9606");
    }

    #[test]
    fn rejections_surface_specific_kind() {
        let mut raw = chemical_gene();
        raw.data_types = "class-foo".into();
        assert!(matches!(
            encode_descriptor(&raw).unwrap_err(),
            DepDocsError::InvalidNodeKind { .. }
        ));

        let mut raw = chemical_gene();
        raw.column_indices = "0;1;2".into();
        assert!(matches!(
            encode_descriptor(&raw).unwrap_err(),
            DepDocsError::InvalidColumnIndex { .. }
        ));

        let mut raw = chemical_gene();
        raw.filter_criteria = "7;9606".into();
        assert!(matches!(
            encode_descriptor(&raw).unwrap_err(),
            DepDocsError::MalformedCriterion { .. }
        ));

        let mut raw = chemical_gene();
        raw.relation = String::new();
        assert!(matches!(
            encode_descriptor(&raw).unwrap_err(),
            DepDocsError::MissingField { field: "relation" }
        ));
    }

    #[test]
    fn pipe_in_list_field_is_rejected() {
        let mut raw = chemical_gene();
        raw.filter_criteria = "7;==;a|b".into();
        assert!(matches!(
            encode_descriptor(&raw).unwrap_err(),
            DepDocsError::ReservedDelimiter { field: "filter_criteria", .. }
        ));
    }
}
