//! Repository listing and deletion paths.

use serde::{Deserialize, Serialize};

/// Repository as returned by `GET /user/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Numeric id.
    pub id: u64,
    /// Repository name.
    pub name: String,
    /// `owner/name`.
    pub full_name: String,
    /// Owner login.
    pub owner: Owner,
    /// Whether the repo is private.
    #[serde(default)]
    pub private: bool,
    /// Whether the repo is a fork.
    #[serde(default)]
    pub fork: bool,
    /// Whether the repo is archived.
    #[serde(default)]
    pub archived: bool,
}

/// Repository owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Login name.
    pub login: String,
}

impl Repository {
    /// Short visibility label for inventories.
    pub fn visibility(&self) -> &'static str {
        if self.private { "private" } else { "public" }
    }

    /// Path of this repository, the prefix for its sub-resources.
    pub fn api_path(&self) -> String {
        format!("repos/{}/{}", self.owner.login, self.name)
    }
}

/// Listing path for the authenticated user's repositories.
pub fn user_repos_path(affiliation: &str) -> String {
    format!(
        "user/repos?affiliation={}",
        urlencoding::encode(&affiliation.replace(' ', ""))
    )
}
