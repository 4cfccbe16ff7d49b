//! The sweep command.
//!
//! Preflight checks, identity probe, execution guard, then one handler per
//! selected resource kind, followed by a summary.

pub mod handler;
pub mod target;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ghsweep_core::cmdutil::{AuthError, FlagError};
use ghsweep_core::config::SweepConfig;
use ghsweep_core::ios_println;
use ghsweep_core::kind::ResourceKind;
use ghsweep_core::preflight;
use tracing::debug;

use crate::factory::Factory;
use crate::guard;
use crate::report::SweepReport;
use handler::SweepContext;

/// List, and optionally delete, everything the token's account owns.
///
/// Runs read-only unless GHSWEEP_ARM equals the guard phrase and the
/// account login is re-typed at the prompt.
#[derive(Args)]
pub struct SweepArgs {
    /// GitHub token (falls back to GH_TOKEN).
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Guard phrase that arms deletion.
    #[arg(long, env = guard::ARM_ENV, hide_env_values = true, value_name = "PHRASE")]
    pub arm: Option<String>,

    /// Config file to read instead of the default one.
    #[arg(long, env = "GHSWEEP_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// GitHub host (github.com or a GitHub Enterprise Server host).
    #[arg(long)]
    pub hostname: Option<String>,

    /// Page size for listing requests (1-100).
    #[arg(long, value_name = "N")]
    pub per_page: Option<u32>,

    /// Executable that must be on PATH before the run starts (repeatable).
    #[arg(long = "require-tool", value_name = "TOOL")]
    pub require_tools: Vec<String>,

    /// Only process these kinds.
    #[arg(long, value_delimiter = ',', value_name = "KIND")]
    pub only: Vec<ResourceKind>,

    /// Skip these kinds.
    #[arg(long, value_delimiter = ',', value_name = "KIND")]
    pub skip: Vec<ResourceKind>,
}

impl std::fmt::Debug for SweepArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweepArgs")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("arm", &self.arm.is_some())
            .field("config", &self.config)
            .field("hostname", &self.hostname)
            .field("per_page", &self.per_page)
            .field("require_tools", &self.require_tools)
            .field("only", &self.only)
            .field("skip", &self.skip)
            .finish()
    }
}

impl SweepArgs {
    /// Merge command-line flags over the file configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError`] if `--only` and `--skip` name the same kind.
    pub fn apply_to(&self, cfg: &mut SweepConfig) -> Result<(), FlagError> {
        if let Some(kind) = self.only.iter().find(|k| self.skip.contains(*k)) {
            return Err(FlagError(format!("--only and --skip both name {kind}")));
        }
        if let Some(ref hostname) = self.hostname {
            cfg.hostname.clone_from(hostname);
        }
        if let Some(per_page) = self.per_page {
            cfg.per_page = per_page;
        }
        cfg.required_tools.extend(self.require_tools.iter().cloned());
        cfg.select_kinds(&self.only, &self.skip);
        Ok(())
    }

    /// Run the sweep.
    ///
    /// # Errors
    ///
    /// Returns a typed error for each fatal category (missing tool, missing
    /// token, unresolved identity, rejected confirmation) and a plain error
    /// for configuration or listing failures.
    pub async fn run(&self, factory: &Factory) -> Result<SweepReport> {
        let ios = &factory.io;
        let cs = ios.color_scheme();

        let mut cfg = factory.config(self.config.as_deref())?;
        self.apply_to(&mut cfg)?;
        cfg.validate().context("invalid configuration")?;
        debug!(?cfg, "Effective configuration");

        preflight::check_required_tools(&cfg.required_tools)?;
        let token = preflight::resolve_token(self.token.as_deref())?;
        guard::check_arm_flag(self.arm.as_deref())?;

        let client = factory.api_client(&cfg.hostname, token)?;
        let user = client.current_user().await.map_err(|e| {
            AuthError(format!(
                "could not resolve the authenticated account on {}: {e}",
                cfg.hostname
            ))
        })?;
        ios_println!(
            ios,
            "Authenticated as {} on {}",
            cs.bold(&user.login),
            cfg.hostname
        );

        let mode = guard::resolve_mode(
            self.arm.as_deref(),
            &user.login,
            ios,
            factory.prompter().as_ref(),
        )?;
        ios_println!(ios, "Mode: {}", mode.label());

        let ctx = SweepContext {
            client,
            login: user.login,
            mode,
            per_page: cfg.per_page,
            affiliation: cfg.affiliation.clone(),
        };
        let report = handler::run_handlers(&ctx, ios, &cfg.kinds).await?;

        ios_println!(ios);
        ios_println!(ios, "{}", report.render(ios));
        Ok(report)
    }
}
