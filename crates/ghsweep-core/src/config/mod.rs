//! Configuration system for ghsweep.
//!
//! Settings come from an optional YAML file and are then overridden by
//! command-line flags. The token is never read from the file.

mod file_config;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::instance::GITHUB_COM;
use crate::kind::ResourceKind;

/// Largest page size the GitHub REST API accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Affiliations accepted by `GET /user/repos`.
const AFFILIATIONS: &[&str] = &["owner", "collaborator", "organization_member"];

/// Configuration directory path (usually ~/.config/ghsweep).
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("GHSWEEP_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::config_dir().map_or_else(
        || {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
                .join("ghsweep")
        },
        |d| d.join("ghsweep"),
    )
}

/// Path of the config file used when none is given explicitly.
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.yml")
}

/// Settings for a sweep run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// GitHub host to talk to (`github.com` or a GitHub Enterprise Server host).
    pub hostname: String,
    /// Page size used for every listing request.
    pub per_page: u32,
    /// `affiliation` filter for the repository listing.
    pub affiliation: String,
    /// Executables that must be on `PATH` before a run starts.
    pub required_tools: Vec<String>,
    /// Resource kinds to process.
    pub kinds: Vec<ResourceKind>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            hostname: GITHUB_COM.to_string(),
            per_page: MAX_PER_PAGE,
            affiliation: "owner".to_string(),
            required_tools: Vec::new(),
            kinds: ResourceKind::ALL.to_vec(),
        }
    }
}

impl SweepConfig {
    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hostname.trim().is_empty() {
            return Err(ConfigError::Invalid("hostname must not be empty".into()));
        }
        if !(1..=MAX_PER_PAGE).contains(&self.per_page) {
            return Err(ConfigError::Invalid(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}, got {}",
                self.per_page
            )));
        }
        for part in self.affiliation.split(',').map(str::trim) {
            if !AFFILIATIONS.contains(&part) {
                return Err(ConfigError::Invalid(format!(
                    "affiliation {part:?} is not one of {}",
                    AFFILIATIONS.join(", ")
                )));
            }
        }
        if self.kinds.is_empty() {
            return Err(ConfigError::Invalid(
                "no resource kinds selected".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a resource kind is selected.
    pub fn includes(&self, kind: ResourceKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Restrict the selected kinds to `only` (when non-empty) and drop `skip`.
    ///
    /// The result keeps the canonical processing order of [`ResourceKind::ALL`].
    pub fn select_kinds(&mut self, only: &[ResourceKind], skip: &[ResourceKind]) {
        self.kinds = ResourceKind::ALL
            .into_iter()
            .filter(|k| self.kinds.contains(k))
            .filter(|k| only.is_empty() || only.contains(k))
            .filter(|k| !skip.contains(k))
            .collect();
    }
}
