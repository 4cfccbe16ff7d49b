//! Repository webhooks.

use serde::{Deserialize, Serialize};

/// A webhook configured on a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    /// Numeric hook id.
    pub id: u64,
    /// Whether deliveries are enabled.
    #[serde(default)]
    pub active: bool,
    /// Delivery configuration.
    #[serde(default)]
    pub config: HookConfig,
}

/// Subset of a webhook's delivery configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookConfig {
    /// Payload URL.
    #[serde(default)]
    pub url: Option<String>,
}

impl Webhook {
    /// Payload URL, or `-` when the API omits it.
    pub fn target_url(&self) -> &str {
        self.config.url.as_deref().unwrap_or("-")
    }

    /// Path the DELETE for this hook is sent to.
    pub fn api_path(&self, repo_path: &str) -> String {
        format!("{repo_path}/hooks/{}", self.id)
    }
}

/// Listing path for a repository's webhooks.
pub fn hooks_path(repo_path: &str) -> String {
    format!("{repo_path}/hooks")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_deserialize_webhook() {
        let json = r#"{
            "id": 12345678,
            "name": "web",
            "active": true,
            "events": ["push"],
            "config": {"url": "https://example.com/webhook", "content_type": "json"}
        }"#;
        let hook: Webhook = serde_json::from_str(json).unwrap();
        assert_eq!(hook.target_url(), "https://example.com/webhook");
        assert_eq!(hook.api_path("repos/o/r"), "repos/o/r/hooks/12345678");
    }

    #[test]
    fn test_should_tolerate_missing_config() {
        let hook: Webhook = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(hook.target_url(), "-");
        assert_eq!(hooks_path("repos/o/r"), "repos/o/r/hooks");
    }
}
