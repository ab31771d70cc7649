//! Application configuration for depdocs.
//!
//! User config lives at `~/.depdocs/depdocs.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DepDocsError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "depdocs.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".depdocs";

// ---------------------------------------------------------------------------
// Config structs (matching depdocs.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Output document file names.
    #[serde(default)]
    pub files: OutputFiles,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory the three documents are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Print the document format guide before an interactive session.
    #[serde(default = "default_true")]
    pub show_guide: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            show_guide: true,
        }
    }
}

fn default_output_dir() -> String {
    "./resources".into()
}
fn default_true() -> bool {
    true
}

/// `[files]` section — names of the three generated documents.
///
/// The downstream build expects the defaults; override only when staging
/// documents for a differently configured consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFiles {
    #[serde(default = "default_resource_info")]
    pub resource_info: String,

    #[serde(default = "default_ontology_sources")]
    pub ontology_sources: String,

    #[serde(default = "default_edge_sources")]
    pub edge_sources: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            resource_info: default_resource_info(),
            ontology_sources: default_ontology_sources(),
            edge_sources: default_edge_sources(),
        }
    }
}

fn default_resource_info() -> String {
    "resource_info.txt".into()
}
fn default_ontology_sources() -> String {
    "ontology_source_list.txt".into()
}
fn default_edge_sources() -> String {
    "edge_source_list.txt".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.depdocs/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| DepDocsError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.depdocs/depdocs.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DepDocsError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| DepDocsError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DepDocsError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DepDocsError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DepDocsError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
