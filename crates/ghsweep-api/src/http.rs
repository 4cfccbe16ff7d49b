//! HTTP client construction.
//!
//! Every request carries the User-Agent, the GitHub media type, and the
//! pinned REST API version.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::debug;

/// REST API version sent with every request.
pub const API_VERSION: &str = "2022-11-28";

/// Header carrying [`API_VERSION`].
pub const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// Options for constructing an HTTP client.
#[derive(Debug)]
pub struct HttpClientOptions {
    /// Application version for User-Agent.
    pub app_version: String,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
}

impl Default for HttpClientOptions {
    fn default() -> Self {
        Self {
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Value of the `User-Agent` header for a given version.
pub fn user_agent(app_version: &str) -> String {
    format!("ghsweep/{app_version}")
}

/// Build a reqwest client with default headers applied.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed.
pub fn build_client(opts: &HttpClientOptions) -> anyhow::Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_str(&user_agent(&opts.app_version))?,
    );
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );
    headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));

    let mut builder = reqwest::Client::builder().default_headers(headers);
    if let Some(timeout) = opts.timeout {
        builder = builder.timeout(timeout);
    }
    debug!(version = %opts.app_version, "Building HTTP client");

    Ok(builder.build()?)
}

/// Format an authorization header value from a token.
pub fn auth_header_value(token: &str) -> String {
    format!("Bearer {token}")
}
