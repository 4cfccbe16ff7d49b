//! Where the REST API lives for a given GitHub host.

/// The public GitHub host.
pub const GITHUB_COM: &str = "github.com";

const GITHUB_COM_API: &str = "https://api.github.com/";

/// Lowercase `host` and strip any scheme and trailing slashes, so
/// `https://GHE.example.com/` and `ghe.example.com` name the same host.
pub fn normalize_hostname(host: &str) -> String {
    let bare = ["https://", "http://"]
        .iter()
        .find_map(|scheme| host.strip_prefix(scheme))
        .unwrap_or(host);
    bare.trim_end_matches('/').to_ascii_lowercase()
}

/// REST base URL for `host`, always ending in `/`.
///
/// github.com is served from `api.github.com`; Enterprise Server hosts serve
/// the API under `/api/v3/`.
pub fn rest_url(host: &str) -> String {
    match normalize_hostname(host).as_str() {
        GITHUB_COM => GITHUB_COM_API.to_string(),
        other => format!("https://{other}/api/v3/"),
    }
}
