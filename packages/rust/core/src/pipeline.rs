//! End-to-end `generate` pipeline: raw edge inputs → encode → three documents on disk.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, instrument};

use depdocs_shared::{DepDocsError, OutputFiles, RawEdgeInput, Result};

use crate::documents::DependencyDocuments;
use crate::grammar::{FIELD_DELIMITER, SOURCE_LIST_DELIMITER};
use crate::writer::write_document;

/// Configuration for the `generate` pipeline.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Directory the documents are written to (created if absent).
    pub output_dir: PathBuf,
    /// File names of the three documents.
    pub files: OutputFiles,
}

/// Paths and counts of a completed write.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    pub output_dir: PathBuf,
    pub resource_info: PathBuf,
    pub ontology_sources: PathBuf,
    pub edge_sources: PathBuf,
    pub edge_count: usize,
    pub ontology_count: usize,
    pub elapsed: std::time::Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each edge is encoded.
    fn edge_encoded(&self, edge: &str, current: usize, total: usize);
    /// Called after each document is written.
    fn document_written(&self, path: &Path);
    /// Called when the pipeline completes.
    fn done(&self, summary: &WriteSummary);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn edge_encoded(&self, _edge: &str, _current: usize, _total: usize) {}
    fn document_written(&self, _path: &Path) {}
    fn done(&self, _summary: &WriteSummary) {}
}

/// Encode every edge in declaration order.
///
/// Aborts on the first invalid edge; the error names the edge.
#[instrument(skip_all, fields(edges = inputs.len()))]
pub fn collect_documents(
    inputs: &[RawEdgeInput],
    progress: &dyn ProgressReporter,
) -> Result<DependencyDocuments> {
    let mut docs = DependencyDocuments::new();

    for (i, raw) in inputs.iter().enumerate() {
        docs.record_edge(raw)
            .map_err(|e| DepDocsError::for_edge(&raw.name, e))?;
        progress.edge_encoded(&raw.name, i + 1, inputs.len());
    }

    info!(
        edges = docs.resources.len(),
        ontologies = docs.ontologies.len(),
        "collected dependency documents"
    );
    Ok(docs)
}

/// Write the three documents into `output_dir`, creating it if needed.
#[instrument(skip_all, fields(output_dir = %output_dir.display()))]
pub fn write_documents(
    output_dir: &Path,
    docs: &DependencyDocuments,
    files: &OutputFiles,
    progress: &dyn ProgressReporter,
) -> Result<WriteSummary> {
    let start = Instant::now();

    if !output_dir.exists() {
        info!(path = %output_dir.display(), "creating output directory");
        std::fs::create_dir_all(output_dir).map_err(|e| DepDocsError::write(output_dir, e))?;
    }

    let field_delimiter = FIELD_DELIMITER.to_string();
    let resource_info = write_document(
        output_dir,
        &files.resource_info,
        &docs.resources,
        &field_delimiter,
    )?;
    progress.document_written(&resource_info);

    let ontology_sources = write_document(
        output_dir,
        &files.ontology_sources,
        &docs.ontologies,
        SOURCE_LIST_DELIMITER,
    )?;
    progress.document_written(&ontology_sources);

    let edge_sources = write_document(
        output_dir,
        &files.edge_sources,
        &docs.edge_sources,
        SOURCE_LIST_DELIMITER,
    )?;
    progress.document_written(&edge_sources);

    Ok(WriteSummary {
        output_dir: output_dir.to_path_buf(),
        resource_info,
        ontology_sources,
        edge_sources,
        edge_count: docs.resources.len(),
        ontology_count: docs.ontologies.len(),
        elapsed: start.elapsed(),
    })
}

/// Run the full pipeline.
///
/// 1. Encode every edge (nothing is written if any edge fails)
/// 2. Create the output directory
/// 3. Write `resource_info`, `ontology_source_list`, `edge_source_list`
#[instrument(skip_all, fields(output_dir = %config.output_dir.display(), edges = inputs.len()))]
pub fn generate(
    config: &GenerateConfig,
    inputs: &[RawEdgeInput],
    progress: &dyn ProgressReporter,
) -> Result<WriteSummary> {
    progress.phase("Encoding edge descriptors");
    let docs = collect_documents(inputs, progress)?;

    progress.phase("Writing dependency documents");
    let summary = write_documents(&config.output_dir, &docs, &config.files, progress)?;

    info!(
        edges = summary.edge_count,
        ontologies = summary.ontology_count,
        path = %summary.output_dir.display(),
        "dependency documents written"
    );
    progress.done(&summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use depdocs_shared::OntologySource;

    use super::*;
    use crate::decoder::{read_resource_info, read_source_list};
    use crate::encoder::encode_descriptor;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("depdocs-pipeline-test-{}", uuid::Uuid::now_v7()))
    }

    fn make_config(output_dir: &Path) -> GenerateConfig {
        GenerateConfig {
            output_dir: output_dir.into(),
            files: OutputFiles::default(),
        }
    }

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
            ontologies: vec![
                OntologySource {
                    name: "chemical".into(),
                    url: "http://purl.obolibrary.org/obo/chebi.owl".into(),
                },
                OntologySource {
                    name: "gene".into(),
                    url: "http://purl.obolibrary.org/obo/so.owl".into(),
                },
            ],
        }
    }

    fn edge(name: &str, data_types: &str, ontologies: &[(&str, &str)]) -> RawEdgeInput {
        RawEdgeInput {
            name: name.into(),
            data_types: data_types.into(),
            relation: "RO_0002435".into(),
            subject_uri: "http://purl.obolibrary.org/obo/".into(),
            object_uri: "http://purl.obolibrary.org/obo/".into(),
            column_delimiter: ",".into(),
            column_indices: "0;1".into(),
            source: format!("./resources/edge_data/{name}.txt"),
            ontologies: ontologies
                .iter()
                .map(|(n, u)| OntologySource {
                    name: (*n).into(),
                    url: (*u).into(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn end_to_end_chemical_gene() {
        let tmp = temp_dir();
        let summary = generate(&make_config(&tmp), &[chemical_gene()], &SilentProgress).unwrap();

        assert_eq!(summary.edge_count, 1);
        assert_eq!(summary.ontology_count, 2);
        assert_eq!(
            std::fs::read_to_string(&summary.resource_info).unwrap(),
            "chemical-gene|;MESH_;|class-class|RO_0002434|http://purl.obolibrary.org/obo/|\
             http://purl.uniprot.org/geneid/|\t|1;4|\
             0:./resources/data_maps/MESH_CHEBI_MAP.txt|None|7;==;9606\n"
        );
        assert_eq!(
            std::fs::read_to_string(&summary.ontology_sources).unwrap(),
            "chemical, http://purl.obolibrary.org/obo/chebi.owl\n\
             gene, http://purl.obolibrary.org/obo/so.owl\n"
        );
        assert_eq!(
            std::fs::read_to_string(&summary.edge_sources).unwrap(),
            "chemical-gene, http://ctdbase.org/reports/CTD_chem_gene_ixns.tsv.gz\n"
        );

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn creates_missing_output_directory() {
        let tmp = temp_dir().join("nested").join("resources");
        assert!(!tmp.exists());

        let summary = generate(&make_config(&tmp), &[], &SilentProgress).unwrap();
        assert!(tmp.is_dir());
        assert_eq!(std::fs::metadata(&summary.resource_info).unwrap().len(), 0);
        assert_eq!(std::fs::metadata(&summary.ontology_sources).unwrap().len(), 0);
        assert_eq!(std::fs::metadata(&summary.edge_sources).unwrap().len(), 0);

        let _ = std::fs::remove_dir_all(tmp.parent().unwrap().parent().unwrap());
    }

    #[test]
    fn output_preserves_declaration_order() {
        let tmp = temp_dir();
        let inputs = [
            edge("gene-protein", "entity-class", &[("protein", "http://purl.obolibrary.org/obo/pr.owl")]),
            edge("disease-chemical", "class-class", &[
                ("disease", "http://purl.obolibrary.org/obo/doid.owl"),
                ("chemical", "http://purl.obolibrary.org/obo/chebi.owl"),
            ]),
        ];

        let summary = generate(&make_config(&tmp), &inputs, &SilentProgress).unwrap();

        let edges: Vec<String> = read_resource_info(&summary.resource_info)
            .unwrap()
            .into_iter()
            .map(|e| e.edge)
            .collect();
        assert_eq!(edges, vec!["gene-protein", "disease-chemical"]);

        let ontologies: Vec<String> = read_source_list(&summary.ontology_sources)
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(ontologies, vec!["protein", "disease", "chemical"]);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn written_documents_decode_to_encoded_descriptors() {
        let tmp = temp_dir();
        let inputs = [
            chemical_gene(),
            edge("gene-gene", "entity-entity", &[]),
        ];
        let summary = generate(&make_config(&tmp), &inputs, &SilentProgress).unwrap();

        let entries = read_resource_info(&summary.resource_info).unwrap();
        assert_eq!(entries.len(), inputs.len());
        for (entry, raw) in entries.iter().zip(&inputs) {
            assert_eq!(entry.edge, raw.name);
            assert_eq!(entry.descriptor, encode_descriptor(raw).unwrap());
        }

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn invalid_edge_aborts_before_writing() {
        let tmp = temp_dir();
        let mut bad = edge(
            "disease-chemical",
            "class-class",
            &[("disease", "http://d"), ("chemical", "http://c")],
        );
        bad.evidence_criteria = "4;IEA".into();
        let inputs = [edge("gene-gene", "entity-entity", &[]), bad];

        let err = generate(&make_config(&tmp), &inputs, &SilentProgress).unwrap_err();
        assert!(err.to_string().contains("disease-chemical"));
        assert!(matches!(err.root(), DepDocsError::MalformedCriterion { .. }));
        assert!(!tmp.exists());
    }

    #[test]
    fn rerun_overwrites_previous_documents() {
        let tmp = temp_dir();
        let config = make_config(&tmp);

        generate(&config, &[chemical_gene()], &SilentProgress).unwrap();
        let summary =
            generate(&config, &[edge("gene-gene", "entity-entity", &[])], &SilentProgress)
                .unwrap();

        let content = std::fs::read_to_string(&summary.resource_info).unwrap();
        assert!(content.starts_with("gene-gene|"));
        assert_eq!(content.lines().count(), 1);
        assert_eq!(std::fs::read_to_string(&summary.ontology_sources).unwrap(), "");

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
