//! API error types.

/// Failure of a GitHub REST call.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// HTTP error response. A missing-scope hint is appended in parentheses.
    #[error(
        "HTTP {status}: {message}{hint}",
        hint = .scopes_suggestion.as_deref().map(|s| format!(" ({s})")).unwrap_or_default()
    )]
    Http {
        /// HTTP status code.
        status: u16,
        /// `message` field of the error body, or the raw body.
        message: String,
        /// Hint naming a scope the token lacks.
        scopes_suggestion: Option<String>,
    },

    /// A listing page failed; names the collection path and the page number.
    #[error("listing {path} failed at page {page}")]
    Page {
        /// Collection path without query parameters.
        path: String,
        /// 1-based page number.
        page: u32,
        /// Underlying failure.
        #[source]
        source: Box<ApiError>,
    },

    /// The body parsed as JSON but did not have the expected shape.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// A request path could not be turned into a URL.
    #[error("invalid request URL {url}: {source}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },

    /// Network/transport error.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("failed to parse API response: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of the failure, looking through page wrappers.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Page { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Whether the token was rejected outright.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_error(status: u16, message: &str) -> ApiError {
        ApiError::Http {
            status,
            message: message.to_string(),
            scopes_suggestion: None,
        }
    }

    #[test]
    fn test_should_detect_unauthorized() {
        assert!(http_error(401, "unauthorized").is_unauthorized());
        assert!(!http_error(403, "forbidden").is_unauthorized());
    }

    #[test]
    fn test_should_display_http_error() {
        let err = http_error(403, "forbidden");
        assert_eq!(err.to_string(), "HTTP 403: forbidden");
    }

    #[test]
    fn test_should_name_path_and_page_without_repeating_cause() {
        let err = ApiError::Page {
            path: "user/repos".to_string(),
            page: 3,
            source: Box::new(http_error(502, "bad gateway")),
        };
        assert_eq!(err.to_string(), "listing user/repos failed at page 3");
        assert_eq!(
            std::error::Error::source(&err).map(ToString::to_string),
            Some("HTTP 502: bad gateway".to_string())
        );
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_should_append_scope_hint_to_http_error() {
        let err = ApiError::Http {
            status: 403,
            message: "Resource not accessible".to_string(),
            scopes_suggestion: Some("needs repo".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 403: Resource not accessible (needs repo)"
        );
    }

    #[test]
    fn test_should_have_no_status_for_shape_errors() {
        let err = ApiError::UnexpectedShape("expected a JSON array".to_string());
        assert!(err.status().is_none());
    }
}
