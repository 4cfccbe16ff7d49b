//! Factory for shared command dependencies.
//!
//! Provides the I/O streams, configuration, prompter, and API client to the
//! sweep. Supports test mode with dependency injection for isolated testing.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use ghsweep_api::client::Client;
use ghsweep_api::http::{HttpClientOptions, build_client};
use ghsweep_core::config::SweepConfig;
use ghsweep_core::iostreams::{IOStreams, TestOutput};
use ghsweep_core::prompter::{DialoguerPrompter, Prompter, StubPrompter};
use secrecy::SecretString;

/// Shared factory providing dependencies to the sweep.
///
/// In production mode, dependencies are created from the real system.
/// In test mode, dependencies can be injected for isolated testing.
pub struct Factory {
    /// Application version.
    pub app_version: String,
    /// I/O streams.
    pub io: IOStreams,

    // Test overrides
    config_override: Option<SweepConfig>,
    http_override: Option<reqwest::Client>,
    api_url_override: Option<String>,
    prompter_stub: Option<Arc<StubPrompter>>,
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("app_version", &self.app_version)
            .field("api_url_override", &self.api_url_override)
            .finish_non_exhaustive()
    }
}

impl Factory {
    /// Create a new factory with the given version.
    pub fn new(app_version: String) -> Self {
        Self {
            app_version,
            io: IOStreams::system(),
            config_override: None,
            http_override: None,
            api_url_override: None,
            prompter_stub: None,
        }
    }

    /// Create a test factory with captured I/O.
    ///
    /// Returns the factory and a `TestOutput` for reading captured
    /// stdout/stderr.
    pub fn test() -> (Self, TestOutput) {
        let (io, output) = IOStreams::test_with_output();

        let factory = Self {
            app_version: "test".to_string(),
            io,
            config_override: None,
            http_override: None,
            api_url_override: None,
            prompter_stub: None,
        };

        (factory, output)
    }

    /// Set a custom reqwest HTTP client (e.g., backed by wiremock).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_override = Some(client);
        self
    }

    /// Set an API URL override (wiremock server URI with trailing slash).
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url_override = Some(url.into());
        self
    }

    /// Use `config` instead of reading a config file.
    #[must_use]
    pub fn with_config(mut self, config: SweepConfig) -> Self {
        self.config_override = Some(config);
        self
    }

    /// Set a stub prompter and return the shared reference for configuration.
    pub fn with_stub_prompter(mut self) -> (Self, Arc<StubPrompter>) {
        let stub = Arc::new(StubPrompter::default());
        self.prompter_stub = Some(stub.clone());
        (self, stub)
    }

    /// Load the configuration from `explicit`, the default file, or the
    /// injected override.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or is invalid.
    pub fn config(&self, explicit: Option<&Path>) -> anyhow::Result<SweepConfig> {
        if let Some(ref cfg) = self.config_override {
            return Ok(cfg.clone());
        }
        SweepConfig::load(explicit).context("failed to load configuration")
    }

    /// Create a prompter instance.
    ///
    /// In test mode with a stub prompter, returns the stub.
    pub fn prompter(&self) -> Box<dyn Prompter> {
        if let Some(ref stub) = self.prompter_stub {
            return Box::new(StubPrompterWrapper(stub.clone()));
        }
        Box::new(DialoguerPrompter)
    }

    /// Build an API client for `hostname` authenticated with `token`.
    ///
    /// In test mode, uses the injected HTTP client and URL override.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn api_client(&self, hostname: &str, token: SecretString) -> anyhow::Result<Client> {
        let http = if let Some(ref client) = self.http_override {
            client.clone()
        } else {
            let opts = HttpClientOptions {
                app_version: self.app_version.clone(),
                ..HttpClientOptions::default()
            };
            build_client(&opts).context("failed to build HTTP client")?
        };

        let mut client = Client::new(http, hostname, Some(token));
        if let Some(ref url) = self.api_url_override {
            client = client.with_url_override(url.clone());
        }
        Ok(client)
    }
}

/// Wrapper to use `Arc<StubPrompter>` as `Box<dyn Prompter>`.
#[derive(Debug)]
struct StubPrompterWrapper(Arc<StubPrompter>);

impl Prompter for StubPrompterWrapper {
    fn input(&self, prompt: &str) -> anyhow::Result<String> {
        self.0.input(prompt)
    }
}
