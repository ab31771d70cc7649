//! Interactive collection session.
//!
//! Asks the operator, edge by edge, for the raw descriptor fields and returns
//! them unvalidated. All validation happens in the encoder once collection
//! is complete.

use color_eyre::eyre::{Result, eyre};
use depdocs_shared::{OntologySource, RawEdgeInput};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

/// Printed before an interactive session.
pub(crate) const GUIDE: &str = r#"
DEPENDENCY DOCUMENT BUILDER

Three documents are generated:

(1) resource_info.txt: one "|"-delimited line per edge type with 11 items:
    edge type           "-"-joined node names (e.g. "chemical-gene")
    source labels       split char;subject label;object label (e.g. ":;GO_;GO_", or ";;")
    data types          "class" or "entity" per node, "-"-joined (e.g. "class-entity")
    edge relation       Relation Ontology identifier (e.g. "RO_0000056")
    subject URI         e.g. "http://purl.uniprot.org/geneid/"
    object URI          e.g. "http://purl.obolibrary.org/obo/"
    delimiter           character splitting data rows into columns (e.g. "t" or ",")
    column indices      subject;object column (e.g. "0;4")
    identifier maps     col:path, ";"-joined for both nodes, or "None"
    evidence criteria   col;op;value sets joined by "::" (e.g. "4;!=;IEA::8;<;0.0001"), or "None"
    filter criteria     same shape as evidence (e.g. "5;==;P::7;==;9606"), or "None"

    chemical-gene|;MESH_;|class-class|RO_0002434|http://purl.obolibrary.org/obo/|http://purl.uniprot.org/geneid/|t|1;4|0:./resources/data_maps/MESH_CHEBI_MAP.txt|None|7;==;9606

(2) ontology_source_list.txt: "<ontology>, <url>" per ontology
    chemical, http://purl.obolibrary.org/obo/chebi.owl

(3) edge_source_list.txt: "<edge>, <url or path>" per edge
    chemical-gene, http://ctdbase.org/reports/CTD_chem_gene_ixns.tsv.gz
"#;

/// Collect `count` edges, one full question round per edge.
pub(crate) fn collect_edges(count: usize) -> Result<Vec<RawEdgeInput>> {
    let mut session = Session::new()?;
    (0..count)
        .map(|i| session.collect_edge(i + 1, count))
        .collect()
}

struct Session {
    editor: DefaultEditor,
}

impl Session {
    fn new() -> Result<Self> {
        let editor =
            DefaultEditor::new().map_err(|e| eyre!("failed to initialize line editor: {e}"))?;
        Ok(Self { editor })
    }

    /// Read one answer. Ctrl-C / Ctrl-D abort the whole session.
    fn ask(&mut self, prompt: &str) -> Result<String> {
        match self.editor.readline(&format!("{prompt}: ")) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                Err(eyre!("session aborted, no documents were written"))
            }
            Err(e) => Err(eyre!("failed to read input: {e}")),
        }
    }

    fn ask_trimmed(&mut self, prompt: &str) -> Result<String> {
        Ok(self.ask(prompt)?.trim().to_string())
    }

    /// Like [`Self::ask_trimmed`], substituting `default` for an empty answer.
    fn ask_or(&mut self, prompt: &str, default: &str) -> Result<String> {
        let answer = self.ask_trimmed(prompt)?;
        Ok(or_default(answer, default))
    }

    fn collect_edge(&mut self, current: usize, total: usize) -> Result<RawEdgeInput> {
        println!("\n{}", "#".repeat(40));
        println!("GATHERING INFORMATION FOR EDGE: {current}/{total}");
        println!("{}\n", "#".repeat(40));

        let name = self.ask_trimmed(
            "Edge type (e.g. \"gene-protein\", \"disease-chemical\")",
        )?;

        let declared = loop {
            let answer = self.ask_trimmed(
                "How many nodes in this edge are ontologies? Enter \"none\", \"one\", or \"both\"",
            )?;
            match ontology_count(&answer) {
                Some(n) => break n,
                None => println!("Please answer \"none\", \"one\", or \"both\"."),
            }
        };

        let mut ontologies = Vec::with_capacity(declared);
        for _ in 0..declared {
            let ontology_name = self.ask_trimmed("Node name for ontology (e.g. \"go\")")?;
            let url = self.ask_trimmed("OWL or OBO URL for this ontology")?;
            ontologies.push(OntologySource {
                name: ontology_name,
                url,
            });
        }

        let data_types = self.ask_trimmed(
            "Data type per node, \"-\"-joined (\"class\" or \"entity\", e.g. \"class-entity\")",
        )?;
        // Not trimmed: the delimiter itself may be whitespace.
        let column_delimiter =
            self.ask("Character used to split each row into columns (e.g. \"t\" or \",\")")?;
        let column_indices =
            self.ask_trimmed("Column index of each node, \";\"-joined (e.g. \"0;3\")")?;
        let identifier_maps = self.ask_or(
            "Identifier maps as col:./filepath, \";\"-joined for both nodes (enter for None)",
            "None",
        )?;
        let evidence_criteria = self.ask_or(
            "Evidence criteria as col;op;value, \"::\"-joined (e.g. \"4;!=;IEA::6;>;0\", enter for None)",
            "None",
        )?;
        let filter_criteria = self.ask_or(
            "Filter criteria as col;op;value, \"::\"-joined (e.g. \"7;==;Homo sapiens\", enter for None)",
            "None",
        )?;
        let relation =
            self.ask_trimmed("Relation Ontology property connecting the nodes (e.g. \"RO_0000056\")")?;
        let subject_uri = self.ask_trimmed(
            "URI prefix for the subject node (e.g. \"http://purl.obolibrary.org/obo/\")",
        )?;
        let object_uri = self.ask_trimmed("URI prefix for the object node")?;
        let source_labels = self.ask_or(
            "Source label rewrite as split;subject label;object label (e.g. \":;GO_;GO_\", enter to keep labels)",
            ";;",
        )?;
        let source = self.ask_trimmed("URL or file path of the data used to create this edge")?;

        debug!(edge = %name, ontologies = ontologies.len(), "edge answers collected");

        Ok(RawEdgeInput {
            name,
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
            source,
            ontologies,
        })
    }
}

fn ontology_count(answer: &str) -> Option<usize> {
    match answer.to_ascii_lowercase().as_str() {
        "none" | "0" => Some(0),
        "one" | "1" => Some(1),
        "both" | "two" | "2" => Some(2),
        _ => None,
    }
}

fn or_default(answer: String, default: &str) -> String {
    if answer.is_empty() {
        default.to_string()
    } else {
        answer
    }
}
