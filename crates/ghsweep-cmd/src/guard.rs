//! Execution guard.
//!
//! A run is read-only unless two independent checks pass: the arm flag
//! equals [`ARM_PHRASE`] exactly, and the operator re-types the login of
//! the authenticated account at an interactive prompt.

use anyhow::Result;
use ghsweep_core::cmdutil::ConfirmationError;
use ghsweep_core::iostreams::IOStreams;
use ghsweep_core::prompter::Prompter;
use tracing::{debug, info};

/// Phrase the arm flag must equal for deletions to happen.
pub const ARM_PHRASE: &str = "delete-everything-i-own";

/// Environment variable carrying the arm flag.
pub const ARM_ENV: &str = "GHSWEEP_ARM";

/// Whether a run may delete anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// List only.
    DryRun,
    /// List and delete.
    Armed,
}

impl ExecutionMode {
    /// Whether deletions are permitted.
    pub fn is_armed(self) -> bool {
        self == Self::Armed
    }

    /// Label for status output.
    pub fn label(self) -> &'static str {
        match self {
            Self::DryRun => "dry run",
            Self::Armed => "ARMED",
        }
    }
}

/// Check the arm flag alone.
///
/// Returns `Ok(false)` when the flag is absent or empty and `Ok(true)` when it
/// equals [`ARM_PHRASE`].
///
/// # Errors
///
/// Returns [`ConfirmationError`] for any other value.
pub fn check_arm_flag(flag: Option<&str>) -> Result<bool, ConfirmationError> {
    match flag {
        None | Some("") => Ok(false),
        Some(ARM_PHRASE) => Ok(true),
        Some(_) => Err(ConfirmationError(format!(
            "{ARM_ENV} is set but does not equal the guard phrase; refusing to run"
        ))),
    }
}

/// Decide the execution mode for the account `login`.
///
/// When armed, asks the operator to type `login` and compares the trimmed
/// answer with it exactly.
///
/// # Errors
///
/// Returns [`ConfirmationError`] (inside `anyhow`) if the flag is wrong, no
/// prompt can be shown or answered, or the typed login differs.
pub fn resolve_mode(
    flag: Option<&str>,
    login: &str,
    ios: &IOStreams,
    prompter: &dyn Prompter,
) -> Result<ExecutionMode> {
    if !check_arm_flag(flag)? {
        debug!("Arm flag not set, running read-only");
        return Ok(ExecutionMode::DryRun);
    }

    if !ios.can_prompt() {
        return Err(ConfirmationError(
            "armed runs need an interactive terminal to confirm the account login".to_string(),
        )
        .into());
    }

    let answer = prompter
        .input(&format!(
            "This will permanently delete resources owned by {login}. Type {login} to confirm:"
        ))
        .map_err(|e| {
            ConfirmationError(format!("could not read the confirmation ({e}); nothing was deleted"))
        })?;
    if answer.trim() != login {
        return Err(ConfirmationError(format!(
            "confirmation {:?} did not match account login {login:?}; nothing was deleted",
            answer.trim()
        ))
        .into());
    }

    info!(login, "Deletion armed");
    Ok(ExecutionMode::Armed)
}
