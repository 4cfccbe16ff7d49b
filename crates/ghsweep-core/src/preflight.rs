//! Checks that run before any network call.

use secrecy::SecretString;
use tracing::debug;

use crate::cmdutil::{MissingTokenError, MissingToolError};

/// Environment variable consulted when no token was passed explicitly.
pub const FALLBACK_TOKEN_ENV: &str = "GH_TOKEN";

/// Return the tools from `tools` that cannot be found on `PATH`.
pub fn missing_tools(tools: &[String]) -> Vec<String> {
    tools
        .iter()
        .filter(|tool| which::which(tool.as_str()).is_err())
        .cloned()
        .collect()
}

/// Verify that every required tool is installed.
///
/// # Errors
///
/// Returns [`MissingToolError`] listing every tool that is absent.
pub fn check_required_tools(tools: &[String]) -> Result<(), MissingToolError> {
    let missing = missing_tools(tools);
    if missing.is_empty() {
        debug!(count = tools.len(), "Required tools present");
        Ok(())
    } else {
        Err(MissingToolError(missing))
    }
}

/// Resolve the API token.
///
/// `explicit` is the value from `--token` / `GITHUB_TOKEN`; when it is
/// absent or blank, `GH_TOKEN` is tried. Blank values count as missing.
///
/// # Errors
///
/// Returns [`MissingTokenError`] if no non-blank token is available.
pub fn resolve_token(explicit: Option<&str>) -> Result<SecretString, MissingTokenError> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(SecretString::from(token.to_string()));
    }

    match std::env::var(FALLBACK_TOKEN_ENV) {
        Ok(token) if !token.trim().is_empty() => {
            debug!("Using token from {FALLBACK_TOKEN_ENV}");
            Ok(SecretString::from(token.trim().to_string()))
        }
        _ => Err(MissingTokenError),
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::test_utils::EnvVarGuard;

    #[test]
    fn test_should_pass_with_no_required_tools() {
        assert!(check_required_tools(&[]).is_ok());
    }

    #[test]
    fn test_should_report_every_missing_tool() {
        let tools = vec![
            "ghsweep-no-such-tool-a".to_string(),
            "ghsweep-no-such-tool-b".to_string(),
        ];
        let err = check_required_tools(&tools).unwrap_err();
        assert_eq!(err.0, tools);
    }

    #[cfg(unix)]
    #[test]
    fn test_should_find_tools_on_path() {
        assert!(missing_tools(&["sh".to_string()]).is_empty());
    }

    #[test]
    fn test_should_prefer_explicit_token() {
        let _guard = EnvVarGuard::set(FALLBACK_TOKEN_ENV, "ghp_fallback");
        let token = resolve_token(Some("ghp_explicit")).unwrap();
        assert_eq!(token.expose_secret(), "ghp_explicit");
    }

    #[test]
    fn test_should_fall_back_to_gh_token() {
        let _guard = EnvVarGuard::set(FALLBACK_TOKEN_ENV, "ghp_fallback");
        let token = resolve_token(None).unwrap();
        assert_eq!(token.expose_secret(), "ghp_fallback");
    }

    #[test]
    fn test_should_treat_blank_explicit_token_as_missing() {
        let _guard = EnvVarGuard::set(FALLBACK_TOKEN_ENV, "ghp_fallback");
        let token = resolve_token(Some("   ")).unwrap();
        assert_eq!(token.expose_secret(), "ghp_fallback");
    }

    #[test]
    fn test_should_fail_without_any_token() {
        let _guard = EnvVarGuard::unset(FALLBACK_TOKEN_ENV);
        assert!(resolve_token(None).is_err());
        assert!(resolve_token(Some("")).is_err());
    }

    #[test]
    fn test_should_fail_with_blank_fallback_token() {
        let _guard = EnvVarGuard::set(FALLBACK_TOKEN_ENV, "");
        assert!(resolve_token(None).is_err());
    }
}
