//! depdocs CLI — builds the dependency documents for a knowledge-graph build.
//!
//! Collects per-edge construction metadata (interactively or from a TOML
//! file) and writes `resource_info.txt`, `ontology_source_list.txt`, and
//! `edge_source_list.txt`.

mod commands;
mod session;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
