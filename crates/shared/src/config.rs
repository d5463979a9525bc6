//! Configuration types for the roster tool

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::RosterError;
use crate::team::DEFAULT_CONFIGURATION_NAME;

/// Where team configurations are kept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// JSON blobs in the data directory
    #[default]
    File,
    /// Process memory only; nothing survives exit
    Memory,
}

/// Application configuration (roster.json / roster.yaml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Directory holding saved configurations and the imported roster
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Name for new, unsaved configurations
    #[serde(default = "default_config_name")]
    pub default_config_name: String,

    /// Prefix exported CSV files with a UTF-8 BOM
    #[serde(default = "default_add_bom")]
    pub add_bom: bool,

    #[serde(default)]
    pub store: StoreKind,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".roster")
}

fn default_config_name() -> String {
    DEFAULT_CONFIGURATION_NAME.to_string()
}

fn default_add_bom() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_config_name: default_config_name(),
            add_bom: default_add_bom(),
            store: StoreKind::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON or YAML file, chosen by extension
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") | None => serde_json::from_str(&content)?,
            Some(other) => {
                return Err(RosterError::Config(format!(
                    "Unsupported config format '.{}' ({})",
                    other,
                    path.display()
                )))
            }
        };
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}
