//! Repository releases.

use serde::{Deserialize, Serialize};

/// A release on a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Numeric release id.
    pub id: u64,
    /// Tag the release points at.
    pub tag_name: String,
    /// Release title.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the release is a draft.
    #[serde(default)]
    pub draft: bool,
    /// Whether the release is a prerelease.
    #[serde(default)]
    pub prerelease: bool,
}

impl Release {
    /// Short state label for inventories.
    pub fn state(&self) -> &'static str {
        if self.draft {
            "draft"
        } else if self.prerelease {
            "prerelease"
        } else {
            "published"
        }
    }

    /// Path the DELETE for this release is sent to.
    pub fn api_path(&self, repo_path: &str) -> String {
        format!("{repo_path}/releases/{}", self.id)
    }
}

/// Listing path for a repository's releases.
pub fn releases_path(repo_path: &str) -> String {
    format!("{repo_path}/releases")
}
