//! Error types for depdocs.
//!
//! Library crates use [`DepDocsError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all depdocs operations.
#[derive(Debug, thiserror::Error)]
pub enum DepDocsError {
    /// Source-label rule has too many parts or a multi-character split char.
    #[error("malformed source label rule '{raw}': {message}")]
    MalformedRule { raw: String, message: String },

    /// A node kind other than `class` or `entity`.
    #[error("invalid node kind in '{raw}': {message}")]
    InvalidNodeKind { raw: String, message: String },

    /// Column index pair with the wrong arity or a non-integer part.
    #[error("invalid column indices '{raw}': {message}")]
    InvalidColumnIndex { raw: String, message: String },

    /// Evidence/filter criterion group that is not `col;op;value`.
    #[error("malformed criterion '{raw}': {message}")]
    MalformedCriterion { raw: String, message: String },

    /// Identifier mapping group that is not `col:path`, or too many groups.
    #[error("invalid identifier mapping '{raw}': {message}")]
    InvalidMapping { raw: String, message: String },

    /// Column delimiter that is not a single character or backslash escape.
    #[error("invalid column delimiter '{raw}'")]
    InvalidColumnDelimiter { raw: String },

    /// A required field was empty.
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    /// A value contains a delimiter reserved by the descriptor grammar.
    #[error("field '{field}' contains reserved delimiter '{delimiter}': '{value}'")]
    ReservedDelimiter {
        field: &'static str,
        delimiter: &'static str,
        value: String,
    },

    /// Edge name not of the form `<subject>-<object>`.
    #[error("invalid edge name '{name}': expected '<subject>-<object>'")]
    InvalidEdgeName { name: String },

    /// Number of ontology sources does not match the `class` endpoints.
    #[error("edge declares {declared} ontology source(s) but data types have {expected} class node(s)")]
    OntologyCountMismatch { declared: usize, expected: usize },

    /// A descriptor line that cannot be split into its ten fields.
    #[error("malformed descriptor: {message}")]
    MalformedDescriptor { message: String },

    /// Failure while encoding a specific edge.
    #[error("edge '{edge}': {source}")]
    Edge {
        edge: String,
        #[source]
        source: Box<DepDocsError>,
    },

    /// Output document could not be written.
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Filesystem read error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Miscellaneous validation error.
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DepDocsError>;

impl DepDocsError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    pub fn malformed_descriptor(msg: impl Into<String>) -> Self {
        Self::MalformedDescriptor {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` raised while writing an output document.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the name of the edge being encoded.
    pub fn for_edge(edge: impl Into<String>, err: DepDocsError) -> Self {
        Self::Edge {
            edge: edge.into(),
            source: Box::new(err),
        }
    }

    /// The underlying error with any edge context stripped.
    pub fn root(&self) -> &DepDocsError {
        match self {
            Self::Edge { source, .. } => source.root(),
            other => other,
        }
    }
}
