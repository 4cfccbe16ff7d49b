//! ghsweep - list, and once explicitly armed, delete what a GitHub account owns.
//!
//! Runs read-only by default. Deletion needs both `GHSWEEP_ARM` set to the
//! guard phrase and the account login re-typed at an interactive prompt.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ghsweep_cmd::factory::Factory;
use ghsweep_cmd::sweep::SweepArgs;
use ghsweep_core::cmdutil::{
    AuthError, ConfirmationError, MissingTokenError, MissingToolError,
};
use ghsweep_core::ios_eprintln;

/// Exit codes, one per fatal error category.
mod exit_codes {
    pub const OK: i32 = 0;
    pub const ERROR: i32 = 1;
    pub const MISSING_TOOL: i32 = 2;
    pub const MISSING_TOKEN: i32 = 3;
    pub const AUTH: i32 = 4;
    pub const CONFIRMATION: i32 = 5;
}

/// Environment variable holding the tracing filter.
const LOG_ENV: &str = "GHSWEEP_LOG";

/// Environment variable selecting JSON log lines.
const LOG_FORMAT_ENV: &str = "GHSWEEP_LOG_FORMAT";

/// Inventory everything a GitHub account owns and optionally delete it.
#[derive(Debug, Parser)]
#[command(
    name = "ghsweep",
    version,
    about = "Inventory, and optionally delete, everything a GitHub account owns",
    long_about = "Lists repositories, gists, SSH keys and the deploy keys, webhooks, \
                  Actions secrets and releases of each repository. Nothing is deleted \
                  unless GHSWEEP_ARM=delete-everything-i-own is set and the account \
                  login is re-typed at the prompt."
)]
struct Cli {
    #[command(flatten)]
    sweep: SweepArgs,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<MissingToolError>().is_some() {
        exit_codes::MISSING_TOOL
    } else if err.downcast_ref::<MissingTokenError>().is_some() {
        exit_codes::MISSING_TOKEN
    } else if err.downcast_ref::<AuthError>().is_some() {
        exit_codes::AUTH
    } else if err.downcast_ref::<ConfirmationError>().is_some() {
        exit_codes::CONFIRMATION
    } else {
        exit_codes::ERROR
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let factory = Factory::new(env!("CARGO_PKG_VERSION").to_string());

    let exit_code = match cli.sweep.run(&factory).await {
        Ok(report) => {
            tracing::debug!(
                listed = report.total_listed(),
                deleted = report.total_deleted(),
                failed = report.total_failed(),
                "Sweep finished"
            );
            exit_codes::OK
        }
        Err(e) => {
            let cs = factory.io.color_scheme();
            ios_eprintln!(factory.io, "{} {e:#}", cs.error_icon());
            exit_code_for(&e)
        }
    };

    std::process::exit(exit_code);
}
