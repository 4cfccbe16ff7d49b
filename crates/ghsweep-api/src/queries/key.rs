//! SSH keys on the account and deploy keys on repositories.

use serde::{Deserialize, Serialize};

/// Listing path for the authenticated user's SSH keys.
pub const SSH_KEYS_PATH: &str = "user/keys";

/// An SSH key attached to the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKey {
    /// Numeric key id.
    pub id: u64,
    /// Key title.
    #[serde(default)]
    pub title: String,
}

impl SshKey {
    /// Path the DELETE for this key is sent to.
    pub fn api_path(&self) -> String {
        format!("user/keys/{}", self.id)
    }
}

/// A deploy key attached to one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployKey {
    /// Numeric key id.
    pub id: u64,
    /// Key title.
    #[serde(default)]
    pub title: String,
    /// Whether the key is read-only.
    #[serde(default)]
    pub read_only: bool,
}

impl DeployKey {
    /// Path the DELETE for this key is sent to.
    pub fn api_path(&self, repo_path: &str) -> String {
        format!("{repo_path}/keys/{}", self.id)
    }
}

/// Listing path for a repository's deploy keys.
pub fn deploy_keys_path(repo_path: &str) -> String {
    format!("{repo_path}/keys")
}
