//! User-related API queries.

use serde::{Deserialize, Serialize};

/// Path of the authenticated-user endpoint.
pub const USER_PATH: &str = "user";

/// Current authenticated user info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name.
    pub login: String,
    /// Numeric account id.
    #[serde(default)]
    pub id: u64,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}
