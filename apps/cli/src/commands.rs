//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use depdocs_core::decoder::read_resource_info;
use depdocs_core::input::load_edge_inputs;
use depdocs_core::pipeline::{GenerateConfig, ProgressReporter, WriteSummary, generate};
use depdocs_shared::{AppConfig, RawEdgeInput, init_config, load_config};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::session;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// depdocs — build the dependency documents for a knowledge-graph build.
#[derive(Parser)]
#[command(
    name = "depdocs",
    version,
    about = "Build resource_info.txt, ontology_source_list.txt, and edge_source_list.txt.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Answer questions for each edge interactively, then write the documents.
    Generate {
        /// Number of edge types to describe.
        #[arg(short, long)]
        edges: usize,

        /// Output directory (defaults to the configured output_dir).
        #[arg(short, long)]
        out: Option<String>,

        /// Skip the document format guide.
        #[arg(long)]
        no_guide: bool,
    },

    /// Build the documents from an edge-definition TOML file.
    Build {
        /// Path to the edge-definition file.
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory (defaults to the configured output_dir).
        #[arg(short, long)]
        out: Option<String>,
    },

    /// Decode and display an existing resource_info.txt.
    Inspect {
        /// Path to resource_info.txt.
        file: PathBuf,

        /// Print decoded descriptors as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
///
/// Logs go to stderr so they never interleave with interactive prompts.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "warn,depdocs_core=info,depdocs_cli=info",
        1 => "warn,depdocs_core=debug,depdocs_cli=debug,depdocs_shared=debug",
        _ => "depdocs_core=trace,depdocs_cli=trace,depdocs_shared=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate {
            edges,
            out,
            no_guide,
        } => cmd_generate(edges, out.as_deref(), no_guide),
        Command::Build { input, out } => cmd_build(&input, out.as_deref()),
        Command::Inspect { file, json } => cmd_inspect(&file, json),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_generate(edges: usize, out: Option<&str>, no_guide: bool) -> Result<()> {
    let config = load_config()?;

    if config.defaults.show_guide && !no_guide {
        println!("{}", session::GUIDE);
    }

    info!(edges, "starting interactive collection");
    let inputs = session::collect_edges(edges)?;

    write_all(&config, out, &inputs)
}

fn cmd_build(input: &Path, out: Option<&str>) -> Result<()> {
    let config = load_config()?;

    let inputs = load_edge_inputs(input)?;
    if inputs.is_empty() {
        return Err(eyre!(
            "no [[edges]] found in '{}' — nothing to build",
            input.display()
        ));
    }

    info!(input = %input.display(), edges = inputs.len(), "building from edge definitions");
    write_all(&config, out, &inputs)
}

/// Shared tail of `generate` and `build`: run the pipeline and print a summary.
fn write_all(config: &AppConfig, out: Option<&str>, inputs: &[RawEdgeInput]) -> Result<()> {
    let output_dir = PathBuf::from(out.unwrap_or(&config.defaults.output_dir));

    let generate_config = GenerateConfig {
        output_dir,
        files: config.files.clone(),
    };

    let reporter = CliProgress::new();
    let summary = generate(&generate_config, inputs, &reporter)?;

    println!();
    println!("  Dependency documents written!");
    println!("  Edges:          {}", summary.edge_count);
    println!("  Ontologies:     {}", summary.ontology_count);
    println!("  Resource info:  {}", summary.resource_info.display());
    println!("  Ontology list:  {}", summary.ontology_sources.display());
    println!("  Edge sources:   {}", summary.edge_sources.display());
    println!("  Time:           {:.2}s", summary.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_inspect(file: &Path, json: bool) -> Result<()> {
    let entries = read_resource_info(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        let d = &entry.descriptor;
        println!("{}", entry.edge);
        println!("  data types:   {}", d.data_types);
        println!("  relation:     {}", d.relation);
        println!("  subject uri:  {}", d.subject_uri);
        println!("  object uri:   {}", d.object_uri);
        println!(
            "  columns:      {} / {} (delimiter {:?})",
            d.column_indices.subject, d.column_indices.object, d.column_delimiter
        );
        println!("  id maps:      {}", d.identifier_maps.len());
        println!("  evidence:     {}", d.evidence_criteria.len());
        println!("  filters:      {}", d.filter_criteria.len());
        println!("  canonical:    {}", d);
    }
    println!();
    println!("  {} edge descriptor(s) decoded", entries.len());

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn edge_encoded(&self, edge: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Encoded [{current}/{total}] {edge}"));
    }

    fn document_written(&self, path: &Path) {
        self.spinner
            .set_message(format!("Wrote {}", path.display()));
    }

    fn done(&self, _summary: &WriteSummary) {
        self.spinner.finish_and_clear();
    }
}
