//! Application configuration for backstageify.
//!
//! User config lives at `~/.backstageify/backstageify.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BackstageifyError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "backstageify.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".backstageify";

/// The awesome-azd gallery index.
pub const DEFAULT_INDEX_URL: &str =
    "https://raw.githubusercontent.com/Azure/awesome-azd/main/website/static/templates.json";

/// Default catalog output file, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "catalog-info.yaml";

/// Default namespace/owner for generated entities.
pub const DEFAULT_NAMESPACE: &str = "awesome-azd";

// ---------------------------------------------------------------------------
// Config structs (matching backstageify.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// HTTP fetch settings.
    #[serde(default)]
    pub fetch: FetchSettings,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Template index URL.
    #[serde(default = "default_index_url")]
    pub index_url: String,

    /// Catalog output file path.
    #[serde(default = "default_output_path")]
    pub output_path: String,

    /// Namespace/owner for generated entities.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            index_url: default_index_url(),
            output_path: default_output_path(),
            namespace: default_namespace(),
        }
    }
}

fn default_index_url() -> String {
    DEFAULT_INDEX_URL.into()
}
fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.into()
}
fn default_namespace() -> String {
    DEFAULT_NAMESPACE.into()
}

/// `[fetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSettings {
    /// Timeout for each HTTP request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.backstageify/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| BackstageifyError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.backstageify/backstageify.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| BackstageifyError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        BackstageifyError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| BackstageifyError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| BackstageifyError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| BackstageifyError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
