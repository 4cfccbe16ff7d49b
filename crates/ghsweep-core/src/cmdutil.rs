//! Command utility types and helpers.
//!
//! Each fatal error category of a sweep run has its own type so the binary
//! can map it to a distinct exit code by downcasting.

/// One or more required tools are not on `PATH`.
#[derive(Debug, thiserror::Error)]
#[error("required tools not found on PATH: {}", .0.join(", "))]
pub struct MissingToolError(pub Vec<String>);

/// No GitHub token was supplied.
#[derive(Debug, thiserror::Error)]
#[error("no GitHub token supplied: set GITHUB_TOKEN or GH_TOKEN, or pass --token")]
pub struct MissingTokenError;

/// The token could not be resolved to an account.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct AuthError(pub String);

/// The execution guard rejected the run.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ConfirmationError(pub String);

/// Error indicating a flag or configuration value issue.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FlagError(pub String);

/// Check if an error is a guard rejection.
pub fn is_confirmation_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ConfirmationError>().is_some()
}
