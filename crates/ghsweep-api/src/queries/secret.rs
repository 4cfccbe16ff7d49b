//! Repository Actions secrets.
//!
//! The listing endpoint wraps its items in `{"total_count": n, "secrets": [...]}`.

use serde::{Deserialize, Serialize};

/// Envelope field holding the secrets array.
pub const SECRETS_FIELD: &str = "secrets";

/// An Actions secret. Values are never returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    /// Secret name.
    pub name: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Secret {
    /// Path the DELETE for this secret is sent to.
    pub fn api_path(&self, repo_path: &str) -> String {
        format!(
            "{repo_path}/actions/secrets/{}",
            urlencoding::encode(&self.name)
        )
    }
}

/// Listing path for a repository's Actions secrets.
pub fn secrets_path(repo_path: &str) -> String {
    format!("{repo_path}/actions/secrets")
}
