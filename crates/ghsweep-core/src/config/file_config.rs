//! File-based configuration loading.
//!
//! Reads `config.yml` from the ghsweep config directory, or from a path
//! given on the command line.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::{SweepConfig, default_config_path};
use crate::errors::ConfigError;

impl SweepConfig {
    /// Load configuration from `explicit`, or from the default location.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        let path = default_config_path();
        if path.exists() {
            Self::load_file(&path)
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load and validate a specific config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::from_yaml(&content, &path.display().to_string())
    }

    /// Parse and validate YAML config content. `origin` names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be parsed or validated.
    pub fn from_yaml(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
                path: origin.to_string(),
                message: e.to_string(),
            })?
        };
        config.validate()?;
        Ok(config)
    }
}
