//! Gist listing and deletion paths.

use serde::{Deserialize, Serialize};

/// Listing path for the authenticated user's gists.
pub const GISTS_PATH: &str = "gists";

/// Gist as returned by `GET /gists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gist {
    /// Gist id (a hex string).
    pub id: String,
    /// Description, often null.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the gist is public.
    #[serde(default)]
    pub public: bool,
}

impl Gist {
    /// Path the DELETE for this gist is sent to.
    pub fn api_path(&self) -> String {
        format!("gists/{}", self.id)
    }
}
