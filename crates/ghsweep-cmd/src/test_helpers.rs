//! Shared test utilities for command testing.
//!
//! Provides a factory wired to a wiremock server, REST mock helpers, and
//! GitHub payload fixtures.

use std::sync::Arc;

use ghsweep_core::config::SweepConfig;
use ghsweep_core::iostreams::TestOutput;
use ghsweep_core::prompter::StubPrompter;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::factory::Factory;
use crate::sweep::SweepArgs;

/// Token the harness authenticates with.
pub const TEST_TOKEN: &str = "ghp_test_token_123";

/// Login returned by [`mock_user`] in most tests.
pub const TEST_LOGIN: &str = "octocat";

/// A fully-configured test harness with factory, output capture, and mock server.
#[derive(Debug)]
pub struct TestHarness {
    /// The factory configured for testing.
    pub factory: Factory,
    /// Captured stdout/stderr output.
    pub output: TestOutput,
    /// Wiremock mock server for API requests.
    pub server: MockServer,
    /// Stub prompter for providing confirmation answers.
    pub prompter: Arc<StubPrompter>,
}

impl TestHarness {
    /// Create a harness with the default configuration.
    pub async fn new() -> Self {
        Self::with_config(SweepConfig::default()).await
    }

    /// Create a harness with a custom configuration.
    pub async fn with_config(config: SweepConfig) -> Self {
        let server = MockServer::start().await;
        let (factory, output) = Factory::test();
        let (factory, prompter) = factory.with_stub_prompter();
        let factory = factory
            .with_http_client(reqwest::Client::new())
            .with_api_url(format!("{}/", server.uri()))
            .with_config(config);

        Self {
            factory,
            output,
            server,
            prompter,
        }
    }

    /// Make stdin and stdout look like a terminal so the guard can prompt.
    pub fn make_interactive(&mut self) {
        let io = &mut self.factory.io;
        io.set_stdin_tty(true);
        io.set_stdout_tty(true);
        io.set_never_prompt(false);
    }

    /// Sweep arguments carrying the test token and nothing else.
    pub fn args(&self) -> SweepArgs {
        SweepArgs {
            token: Some(TEST_TOKEN.to_string()),
            arm: None,
            config: None,
            hostname: None,
            per_page: None,
            require_tools: Vec::new(),
            only: Vec::new(),
            skip: Vec::new(),
        }
    }

    /// Get captured stdout as a string.
    pub fn stdout(&self) -> String {
        self.output.stdout()
    }

    /// Get captured stderr as a string.
    pub fn stderr(&self) -> String {
        self.output.stderr()
    }
}

// --- Wiremock helpers ---

/// Mount `GET /user` returning `login`.
pub async fn mock_user(server: &MockServer, login: &str) {
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_fixture(login)))
        .mount(server)
        .await;
}

/// Mount a paged listing: page `n` returns `pages[n - 1]`, and the page after
/// the last one returns `empty`. Each page must be requested exactly once.
pub async fn mock_pages_with(server: &MockServer, url_path: &str, pages: Vec<Value>, empty: Value) {
    let last = pages.len() + 1;
    for (idx, body) in pages.into_iter().chain(std::iter::once(empty)).enumerate() {
        Mock::given(method("GET"))
            .and(path(url_path))
            .and(query_param("page", (idx + 1).to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .named(format!("{url_path} page {}/{last}", idx + 1))
            .mount(server)
            .await;
    }
}

/// Mount a paged listing whose pages are JSON arrays.
pub async fn mock_pages(server: &MockServer, url_path: &str, pages: Vec<Value>) {
    mock_pages_with(server, url_path, pages, json!([])).await;
}

/// Mount a single-page listing of `items`.
pub async fn mock_list(server: &MockServer, url_path: &str, items: Vec<Value>) {
    mock_pages(server, url_path, vec![Value::Array(items)]).await;
}

/// Mount a listing that is empty from the first page.
pub async fn mock_empty_list(server: &MockServer, url_path: &str) {
    mock_pages(server, url_path, Vec::new()).await;
}

/// Mount a REST GET response mock that returns a specific status code with a JSON body.
pub async fn mock_rest_get_status(server: &MockServer, url_path: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a REST DELETE mock that must be hit exactly `times` times.
pub async fn mock_rest_delete(server: &MockServer, url_path: &str, status: u16, times: u64) {
    Mock::given(method("DELETE"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(status))
        .expect(times)
        .named(format!("DELETE {url_path}"))
        .mount(server)
        .await;
}

/// Fail the test if any DELETE reaches the server.
pub async fn forbid_deletes(server: &MockServer) {
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .named("any DELETE")
        .mount(server)
        .await;
}

// --- Payload fixtures ---

/// `GET /user` body.
pub fn user_fixture(login: &str) -> Value {
    json!({ "login": login, "id": 583_231, "name": "The Octocat", "type": "User" })
}

/// A repository owned by `owner`.
pub fn repo_fixture(owner: &str, name: &str) -> Value {
    json!({
        "id": 1_296_269,
        "name": name,
        "full_name": format!("{owner}/{name}"),
        "owner": { "login": owner, "id": 1 },
        "private": false,
        "fork": false,
        "archived": false,
        "html_url": format!("https://github.com/{owner}/{name}")
    })
}

/// A gist.
pub fn gist_fixture(id: &str, description: &str) -> Value {
    json!({ "id": id, "description": description, "public": true, "files": {} })
}

/// An SSH key or deploy key.
pub fn key_fixture(id: u64, title: &str) -> Value {
    json!({ "id": id, "title": title, "key": "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAITest", "read_only": true })
}

/// A webhook.
pub fn hook_fixture(id: u64, url: &str) -> Value {
    json!({ "id": id, "name": "web", "active": true, "config": { "url": url, "content_type": "json" } })
}

/// An Actions secrets envelope.
pub fn secrets_page(names: &[&str]) -> Value {
    let secrets: Vec<Value> = names
        .iter()
        .map(|n| json!({ "name": n, "updated_at": "2024-01-15T10:00:00Z" }))
        .collect();
    json!({ "total_count": names.len(), "secrets": secrets })
}

/// A release.
pub fn release_fixture(id: u64, tag: &str) -> Value {
    json!({ "id": id, "tag_name": tag, "name": format!("Release {tag}"), "draft": false, "prerelease": false })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_should_create_test_harness() {
        let h = TestHarness::new().await;
        assert!(h.stdout().is_empty());
        assert!(h.stderr().is_empty());
        assert!(!h.factory.io.can_prompt());
    }

    #[tokio::test]
    async fn test_should_make_harness_interactive() {
        let mut h = TestHarness::new().await;
        h.make_interactive();
        assert!(h.factory.io.can_prompt());
    }

    #[tokio::test]
    async fn test_should_capture_output_through_factory() {
        let h = TestHarness::new().await;
        h.factory.io.println_out("hello from test");
        assert_eq!(h.stdout(), "hello from test\n");
    }
}
