//! Identifiers shared between the page markup and this crate.
//!
//! The defaults match the markup the age spans and theme toggle are
//! rendered with. A JSON file can override any of them; missing fields keep
//! their defaults.
//!
//! ```rust
//! use tintage::Config;
//!
//! let config = Config::from_json(r#"{ "theme": { "storage_key": "site-theme" } }"#).unwrap();
//! assert_eq!(config.theme.storage_key, "site-theme");
//! assert_eq!(config.theme.toggle_id, "theme-toggle");
//! assert_eq!(config.age.timestamp_attribute, "data-ut");
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Storage key holding the persisted theme.
pub const DEFAULT_STORAGE_KEY: &str = "cgit-theme";
/// Root element attribute carrying the active theme.
pub const DEFAULT_THEME_ATTRIBUTE: &str = "data-theme";
/// Id of the optional theme toggle control.
pub const DEFAULT_TOGGLE_ID: &str = "theme-toggle";
/// Attribute holding an age element's Unix timestamp.
pub const DEFAULT_TIMESTAMP_ATTRIBUTE: &str = "data-ut";

/// Error loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeSettings,
    pub age: AgeSettings,
}

/// Identifiers used by the theme controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub storage_key: String,
    pub attribute: String,
    pub toggle_id: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            attribute: DEFAULT_THEME_ATTRIBUTE.to_string(),
            toggle_id: DEFAULT_TOGGLE_ID.to_string(),
        }
    }
}

/// Identifiers used by the age renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeSettings {
    pub timestamp_attribute: String,
}

impl Default for AgeSettings {
    fn default() -> Self {
        Self {
            timestamp_attribute: DEFAULT_TIMESTAMP_ATTRIBUTE.to_string(),
        }
    }
}

impl Config {
    /// Parses a JSON configuration. Absent fields take their defaults.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&source)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
