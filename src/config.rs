use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::document::DEFAULT_OPENAPI_FILE;
use crate::domain::OverrideSelection;
use crate::error::{InfoSyncError, Result};
use crate::spdx::http::DEFAULT_SPDX_BASE_URL;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "openapi-info.toml";

/// Represents the complete configuration for openapi-info-sync.
///
/// Supplies the defaults of every run parameter that does not come from the
/// project manifest, plus network settings for the SPDX download.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_openapi_file")]
    pub openapi_file: PathBuf,

    #[serde(default = "default_openapi_version")]
    pub openapi_version: String,

    #[serde(default = "default_spdx_license_data_version")]
    pub spdx_license_data_version: String,

    #[serde(default = "OverrideSelection::standard", rename = "override")]
    pub overrides: OverrideSelection,

    /// Explicit manifest path; discovered in the working directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,

    #[serde(default)]
    pub network: NetworkConfig,
}

/// Returns the default target document path.
fn default_openapi_file() -> PathBuf {
    PathBuf::from(DEFAULT_OPENAPI_FILE)
}

/// Returns the default OpenAPI version for new documents.
fn default_openapi_version() -> String {
    "3.1.0".to_string()
}

/// Returns the default SPDX license list version.
fn default_spdx_license_data_version() -> String {
    "3.17".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_spdx_base_url() -> String {
    DEFAULT_SPDX_BASE_URL.to_string()
}

/// Configuration for the SPDX license list download.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NetworkConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_spdx_base_url")]
    pub spdx_base_url: String,
}

impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            timeout_secs: default_timeout_secs(),
            spdx_base_url: default_spdx_base_url(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            openapi_file: default_openapi_file(),
            openapi_version: default_openapi_version(),
            spdx_license_data_version: default_spdx_license_data_version(),
            overrides: OverrideSelection::standard(),
            manifest: None,
            network: NetworkConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `openapi-info.toml` in current directory
/// 3. `.openapi-info.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        PathBuf::from(CONFIG_FILE_NAME)
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            config_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path)
        .map_err(|e| InfoSyncError::config(format!("cannot read {}: {}", path.display(), e)))?;
    parse_config(&config_str)
        .map_err(|e| InfoSyncError::config(format!("{}: {}", path.display(), e)))
}

/// Parse configuration from TOML text.
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| InfoSyncError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InfoField;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.openapi_file, PathBuf::from("openapi.yaml"));
        assert_eq!(config.openapi_version, "3.1.0");
        assert_eq!(config.spdx_license_data_version, "3.17");
        assert_eq!(config.overrides, OverrideSelection::standard());
        assert_eq!(config.network.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file() {
        let config = parse_config(
            r#"
openapi_version = "3.0.3"
override = ["title", "version"]

[network]
timeout_secs = 5
"#,
        )
        .unwrap();

        assert_eq!(config.openapi_version, "3.0.3");
        assert!(config.overrides.contains(InfoField::Title));
        assert!(!config.overrides.contains(InfoField::License));
        assert_eq!(config.network.timeout_secs, 5);
        assert_eq!(config.network.spdx_base_url, DEFAULT_SPDX_BASE_URL);
        assert_eq!(config.spdx_license_data_version, "3.17");
    }

    #[test]
    fn test_unknown_override_field() {
        let err = parse_config(r#"override = ["summary"]"#).unwrap_err();
        assert!(matches!(err, InfoSyncError::Config(_)));
    }
}
