//! Shared types, error model, and configuration for depdocs.
//!
//! This crate is the foundation depended on by the other depdocs crates.
//! It provides:
//! - [`DepDocsError`] — the unified error type
//! - Domain types ([`EdgeDescriptor`], [`RawEdgeInput`], [`NodeKind`], ...)
//! - Configuration ([`AppConfig`], [`OutputFiles`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, OutputFiles, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{DepDocsError, Result};
pub use types::{
    ColumnIndexPair, Criterion, DataTypePair, EdgeDescriptor, IdentifierMapping, NodeKind,
    OntologySource, RawEdgeInput, SourceLabelRule,
};
