//! High-level GitHub REST client.
//!
//! Provides typed GET requests, page-number pagination that runs until the
//! API returns an empty page, and a DELETE that reports the response status
//! instead of failing on it.

use std::collections::HashSet;

use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::errors::ApiError;
use crate::http::auth_header_value;
use crate::queries::user::{USER_PATH, User};
use ghsweep_core::instance;

/// GitHub API client wrapping reqwest with auth and error handling.
///
/// Tokens are stored as [`SecretString`] to prevent accidental logging or
/// exposure through `Debug` output.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    hostname: String,
    token: Option<SecretString>,
    /// Optional base URL override for testing (e.g., `"http://127.0.0.1:PORT/"`).
    api_url_override: Option<String>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("hostname", &self.hostname)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("api_url_override", &self.api_url_override)
            .finish_non_exhaustive()
    }
}

/// Result of a single DELETE request.
///
/// Non-success statuses are data here, not errors: the caller decides how
/// to report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, usually empty on success.
    pub message: String,
    /// Hint naming a missing OAuth scope, when the headers show one.
    pub scopes_suggestion: Option<String>,
}

impl DeleteResponse {
    /// Whether the API confirmed the deletion with `204 No Content`.
    pub fn is_deleted(&self) -> bool {
        self.status == 204
    }
}

impl Client {
    /// Create a new API client for a specific hostname.
    pub fn new(http: reqwest::Client, hostname: &str, token: Option<SecretString>) -> Self {
        Self {
            http,
            hostname: instance::normalize_hostname(hostname),
            token,
            api_url_override: None,
        }
    }

    /// Set a base URL override for testing.
    ///
    /// The URL should include the trailing slash, e.g., `"http://127.0.0.1:8080/"`.
    #[must_use]
    pub fn with_url_override(mut self, url: String) -> Self {
        self.api_url_override = Some(url);
        self
    }

    /// Get the hostname this client is configured for.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Build a request with authentication headers applied.
    fn authed_request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, url);
        if let Some(ref token) = self.token {
            req = req.header("Authorization", auth_header_value(token.expose_secret()));
        }
        req
    }

    /// Execute a REST API request.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure or non-success status.
    pub async fn rest<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        let url = self.resolve_rest_url(path);
        debug!(%method, %url, "REST request");
        let mut req = self.authed_request(method, &url);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = self.check_response(req.send().await?).await?;
        Ok(resp.json().await?)
    }

    /// Fetch the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the response is malformed.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.rest(reqwest::Method::GET, USER_PATH, None).await
    }

    /// Collect every item of a collection whose pages are JSON arrays.
    ///
    /// Requests `page=1, 2, ...` with the given `per_page` until a page comes
    /// back empty.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Page`] naming the path and page on the first failed
    /// or malformed page.
    pub async fn rest_paginate<T: DeserializeOwned>(
        &self,
        path: &str,
        per_page: u32,
    ) -> Result<Vec<T>, ApiError> {
        self.collect_pages(path, per_page, |body| {
            if !body.is_array() {
                return Err(ApiError::UnexpectedShape(format!(
                    "expected a JSON array, got {}",
                    json_kind(&body)
                )));
            }
            Ok(serde_json::from_value(body)?)
        })
        .await
    }

    /// Collect every item of a collection whose pages wrap the items in an
    /// envelope object under `field` (e.g. `{"total_count": 2, "secrets": [...]}`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Page`] naming the path and page on the first failed
    /// or malformed page.
    pub async fn rest_paginate_field<T: DeserializeOwned>(
        &self,
        path: &str,
        per_page: u32,
        field: &str,
    ) -> Result<Vec<T>, ApiError> {
        self.collect_pages(path, per_page, |body| match body {
            Value::Object(mut map) => match map.remove(field) {
                Some(items @ Value::Array(_)) => Ok(serde_json::from_value(items)?),
                Some(other) => Err(ApiError::UnexpectedShape(format!(
                    "field `{field}` is {}, not an array",
                    json_kind(&other)
                ))),
                None => Err(ApiError::UnexpectedShape(format!(
                    "missing field `{field}`"
                ))),
            },
            other => Err(ApiError::UnexpectedShape(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        })
        .await
    }

    async fn collect_pages<T, F>(
        &self,
        path: &str,
        per_page: u32,
        extract: F,
    ) -> Result<Vec<T>, ApiError>
    where
        F: Fn(Value) -> Result<Vec<T>, ApiError>,
    {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let batch = self
                .fetch_page(path, per_page, page)
                .await
                .and_then(&extract)
                .map_err(|e| ApiError::Page {
                    path: strip_query(path).to_string(),
                    page,
                    source: Box::new(e),
                })?;
            debug!(path, page, count = batch.len(), "Fetched page");

            if batch.is_empty() {
                break;
            }
            items.extend(batch);
            page += 1;
        }

        Ok(items)
    }

    async fn fetch_page(&self, path: &str, per_page: u32, page: u32) -> Result<Value, ApiError> {
        let url = self.page_url(path, per_page, page)?;
        let resp = self
            .authed_request(reqwest::Method::GET, url.as_str())
            .send()
            .await?;
        let resp = self.check_response(resp).await?;
        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Issue a DELETE and report the status, whatever it is.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was received.
    pub async fn delete(&self, path: &str) -> Result<DeleteResponse, ApiError> {
        let url = self.resolve_rest_url(path);
        debug!(%url, "DELETE request");
        let resp = self
            .authed_request(reqwest::Method::DELETE, &url)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let scopes_suggestion = self.suggestion_from_headers(status, resp.headers());
        let message = error_message(&resp.text().await.unwrap_or_default());
        Ok(DeleteResponse {
            status,
            message,
            scopes_suggestion,
        })
    }

    /// Check a response for errors and return an `ApiError::Http` if the
    /// status is not successful.
    async fn check_response(&self, resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let scopes_suggestion = self.suggestion_from_headers(status.as_u16(), resp.headers());
        Err(ApiError::Http {
            status: status.as_u16(),
            message: error_message(&resp.text().await.unwrap_or_default()),
            scopes_suggestion,
        })
    }

    fn suggestion_from_headers(&self, status: u16, headers: &HeaderMap) -> Option<String> {
        generate_scopes_suggestion(
            status,
            headers
                .get("x-accepted-oauth-scopes")
                .and_then(|v| v.to_str().ok()),
            headers.get("x-oauth-scopes").and_then(|v| v.to_str().ok()),
            &self.hostname,
        )
    }

    fn resolve_rest_url(&self, path: &str) -> String {
        if path.starts_with("https://") || path.starts_with("http://") {
            path.to_string()
        } else {
            let base = match self.api_url_override {
                Some(ref url) => url.clone(),
                None => instance::rest_url(&self.hostname),
            };
            format!("{base}{}", path.trim_start_matches('/'))
        }
    }

    fn page_url(&self, path: &str, per_page: u32, page: u32) -> Result<Url, ApiError> {
        let raw = self.resolve_rest_url(path);
        let mut url = Url::parse(&raw).map_err(|source| ApiError::InvalidUrl { url: raw, source })?;
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }
}

/// GitHub error bodies look like `{"message": "..."}`; anything else is
/// passed through trimmed.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(p, _)| p)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Scopes a classic token holds once its parent scopes are expanded, e.g.
/// `repo` also grants `public_repo` and `admin:public_key` grants
/// `write:public_key` and `read:public_key`.
fn granted_scopes(header: &str) -> HashSet<String> {
    let mut granted = HashSet::new();
    for scope in header.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match scope {
            "repo" => granted.extend(
                ["repo:status", "repo_deployment", "public_repo", "repo:invite"].map(String::from),
            ),
            "user" => granted.extend(["read:user", "user:email", "user:follow"].map(String::from)),
            _ => {}
        }
        if let Some(rest) = scope.strip_prefix("admin:") {
            granted.insert(format!("write:{rest}"));
            granted.insert(format!("read:{rest}"));
        }
        if let Some(rest) = scope.strip_prefix("write:") {
            granted.insert(format!("read:{rest}"));
        }
        granted.insert(scope.to_string());
    }
    granted
}

/// Hint naming the first scope a 4xx response says is missing.
///
/// `needs` is `X-Accepted-OAuth-Scopes` and `has` is `X-OAuth-Scopes`. A
/// fine-grained token sends no `X-OAuth-Scopes`, and then there is nothing
/// to compare, so no hint is given. `422` is a validation failure, never a
/// scope problem.
pub fn generate_scopes_suggestion(
    status: u16,
    needs: Option<&str>,
    has: Option<&str>,
    hostname: &str,
) -> Option<String> {
    if !(400..500).contains(&status) || status == 422 {
        return None;
    }
    let has = has.filter(|h| !h.trim().is_empty())?;
    let granted = granted_scopes(has);

    let missing = needs?
        .split(',')
        .map(str::trim)
        .find(|s| !s.is_empty() && !granted.contains(*s))?;
    Some(format!(
        "The token lacks the \"{missing}\" scope. Add it at https://{}/settings/tokens",
        instance::normalize_hostname(hostname),
    ))
}
