//! Host configuration storage
//!
//! Handles the JSON configuration file: default locale, linearization
//! policy, suggestion count and an optional external pattern catalog.

use std::path::{Path, PathBuf};

use promps_core::{LinearizePolicy, Locale};
use serde::{Deserialize, Serialize};

use crate::constants::defaults;

/// Full host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Locale used when a request does not name one
    pub default_locale: Locale,
    /// Which editor chains contribute tokens
    pub linearize_policy: LinearizePolicy,
    /// Number of actionable pattern suggestions
    pub max_suggestions: usize,
    /// JSON catalog replacing the built-in patterns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_catalog: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            linearize_policy: LinearizePolicy::default(),
            max_suggestions: defaults::MAX_SUGGESTIONS,
            pattern_catalog: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&contents).map_err(ConfigError::Parse)?;

        // A relative catalog path is relative to the config file
        if let (Some(catalog), Some(dir)) = (&config.pattern_catalog, path.parent()) {
            if catalog.is_relative() {
                config.pattern_catalog = Some(dir.join(catalog));
            }
        }

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::warn!("No configuration at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save configuration to a file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents)?;

        log::info!("Configuration saved to {:?}", path);
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(serde_json::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(serde_json::Error),
}
