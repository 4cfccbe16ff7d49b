//! Resource handlers: list, print an inventory, delete when armed.

use anyhow::{Context, Result, bail};
use ghsweep_api::client::Client;
use ghsweep_api::queries::gist::{GISTS_PATH, Gist};
use ghsweep_api::queries::hook::{Webhook, hooks_path};
use ghsweep_api::queries::key::{DeployKey, SSH_KEYS_PATH, SshKey, deploy_keys_path};
use ghsweep_api::queries::release::{Release, releases_path};
use ghsweep_api::queries::repo::{Repository, user_repos_path};
use ghsweep_api::queries::secret::{SECRETS_FIELD, Secret, secrets_path};
use ghsweep_core::{ios_eprintln, ios_println};
use ghsweep_core::iostreams::IOStreams;
use ghsweep_core::kind::ResourceKind;
use ghsweep_core::table::TablePrinter;
use tracing::{debug, info, warn};

use super::target::{Target, columns};
use crate::guard::ExecutionMode;
use crate::report::{DeleteOutcome, KindReport, SweepReport};

/// Everything a handler needs, passed explicitly.
#[derive(Debug)]
pub struct SweepContext {
    /// Authenticated API client.
    pub client: Client,
    /// Login of the authenticated account.
    pub login: String,
    /// Whether deletes are issued.
    pub mode: ExecutionMode,
    /// Page size for listings.
    pub per_page: u32,
    /// `affiliation` filter for the repository listing.
    pub affiliation: String,
}

/// List the repositories the sweep works on.
///
/// Only repositories owned by the authenticated account are returned. A
/// wider `affiliation` can list organisation or collaborator repositories;
/// those are reported on stderr and left alone.
///
/// # Errors
///
/// Returns an error if any page cannot be fetched.
pub async fn list_repos(ctx: &SweepContext, ios: &IOStreams) -> Result<Vec<Repository>> {
    let listed: Vec<Repository> = ctx
        .client
        .rest_paginate(&user_repos_path(&ctx.affiliation), ctx.per_page)
        .await
        .context("failed to list repositories")?;

    let (owned, foreign): (Vec<_>, Vec<_>) = listed
        .into_iter()
        .partition(|r| r.owner.login.eq_ignore_ascii_case(&ctx.login));
    for repo in &foreign {
        warn!(
            repo = %repo.full_name,
            owner = %repo.owner.login,
            "Skipping repository not owned by the account"
        );
        ios_eprintln!(
            ios,
            "{} Skipping {}: owned by {}, not {}",
            ios.color_scheme().warning_icon(),
            repo.full_name,
            repo.owner.login,
            ctx.login
        );
    }
    Ok(owned)
}

/// List an account-level kind (gists or SSH keys).
///
/// # Errors
///
/// Returns an error if the listing fails or `kind` is not account-level.
pub async fn list_account_targets(ctx: &SweepContext, kind: ResourceKind) -> Result<Vec<Target>> {
    let targets = match kind {
        ResourceKind::Gists => ctx
            .client
            .rest_paginate::<Gist>(GISTS_PATH, ctx.per_page)
            .await
            .context("failed to list gists")?
            .iter()
            .map(Target::gist)
            .collect(),
        ResourceKind::SshKeys => ctx
            .client
            .rest_paginate::<SshKey>(SSH_KEYS_PATH, ctx.per_page)
            .await
            .context("failed to list SSH keys")?
            .iter()
            .map(Target::ssh_key)
            .collect(),
        other => bail!("{other} is not an account-level resource kind"),
    };
    Ok(targets)
}

/// List a repository-scoped kind on one repository.
///
/// # Errors
///
/// Returns an error if the listing fails or `kind` is not repository-scoped.
pub async fn list_repo_targets(
    ctx: &SweepContext,
    kind: ResourceKind,
    repo: &Repository,
) -> Result<Vec<Target>> {
    let base = repo.api_path();
    let client = &ctx.client;
    let failed = || format!("failed to list {} of {}", kind.title().to_lowercase(), repo.full_name);

    let targets = match kind {
        ResourceKind::DeployKeys => client
            .rest_paginate::<DeployKey>(&deploy_keys_path(&base), ctx.per_page)
            .await
            .with_context(failed)?
            .iter()
            .map(|k| Target::deploy_key(repo, k))
            .collect(),
        ResourceKind::Webhooks => client
            .rest_paginate::<Webhook>(&hooks_path(&base), ctx.per_page)
            .await
            .with_context(failed)?
            .iter()
            .map(|h| Target::webhook(repo, h))
            .collect(),
        ResourceKind::Secrets => client
            .rest_paginate_field::<Secret>(&secrets_path(&base), ctx.per_page, SECRETS_FIELD)
            .await
            .with_context(failed)?
            .iter()
            .map(|s| Target::secret(repo, s))
            .collect(),
        ResourceKind::Releases => client
            .rest_paginate::<Release>(&releases_path(&base), ctx.per_page)
            .await
            .with_context(failed)?
            .iter()
            .map(|r| Target::release(repo, r))
            .collect(),
        other => bail!("{other} is not a repository-scoped resource kind"),
    };
    Ok(targets)
}

/// Print the inventory section for one batch of targets.
pub fn print_inventory(ios: &IOStreams, title: &str, kind: ResourceKind, targets: &[Target]) {
    let cs = ios.color_scheme();
    ios_println!(ios, "{} ({})", cs.bold(title), targets.len());
    if targets.is_empty() {
        return;
    }

    let mut tp = TablePrinter::new(ios).with_headers(columns(kind));
    for t in targets {
        tp.add_row(t.row.clone());
    }
    ios_println!(ios, "{}", tp.render());
}

/// Delete each target in turn when armed, reporting every outcome.
///
/// A failed delete never stops the remaining ones.
pub async fn delete_targets(
    ctx: &SweepContext,
    ios: &IOStreams,
    targets: &[Target],
    report: &mut KindReport,
) {
    if !ctx.mode.is_armed() {
        return;
    }

    let cs = ios.color_scheme();
    for t in targets {
        let outcome = DeleteOutcome::from_result(ctx.client.delete(&t.delete_path).await);
        match outcome.reason() {
            None => {
                info!(kind = %t.kind, target = %t.label, "Deleted");
                ios_println!(
                    ios,
                    "{} Deleted {} {}",
                    cs.success_icon(),
                    t.kind.noun(),
                    t.label
                );
            }
            Some(reason) => {
                warn!(kind = %t.kind, target = %t.label, %reason, "Delete failed");
                ios_println!(
                    ios,
                    "{} Failed to delete {} {}: {}",
                    cs.warning_icon(),
                    t.kind.noun(),
                    t.label,
                    cs.warning(&reason)
                );
            }
        }
        report.record(&outcome);
    }
}

async fn handle(
    ctx: &SweepContext,
    ios: &IOStreams,
    title: &str,
    kind: ResourceKind,
    targets: &[Target],
    report: &mut KindReport,
) {
    report.listed += targets.len();
    print_inventory(ios, title, kind, targets);
    delete_targets(ctx, ios, targets, report).await;
}

/// Run every selected kind and return the totals.
///
/// Repository-scoped kinds run first, repository by repository, so that
/// no sub-resource listing targets a repository deleted earlier in the run.
///
/// # Errors
///
/// Returns an error on the first listing failure. Delete failures are
/// counted in the report instead.
pub async fn run_handlers(
    ctx: &SweepContext,
    ios: &IOStreams,
    kinds: &[ResourceKind],
) -> Result<SweepReport> {
    let selected: Vec<ResourceKind> = ResourceKind::ALL
        .into_iter()
        .filter(|k| kinds.contains(k))
        .collect();
    let mut report = SweepReport::new(ctx.mode, &selected);
    info!(login = %ctx.login, mode = ctx.mode.label(), kinds = selected.len(), "Starting sweep");

    let (repo_kinds, account_kinds): (Vec<_>, Vec<_>) =
        selected.iter().copied().partition(|k| k.is_repo_scoped());

    let repos = if repo_kinds.is_empty() && !selected.contains(&ResourceKind::Repos) {
        Vec::new()
    } else {
        list_repos(ctx, ios).await?
    };
    debug!(count = repos.len(), "Listed repositories");

    for repo in &repos {
        for &kind in &repo_kinds {
            let targets = list_repo_targets(ctx, kind, repo).await?;
            let title = format!("{} in {}", kind.title(), repo.full_name);
            handle(ctx, ios, &title, kind, &targets, report.entry(kind)).await;
        }
    }

    for &kind in &account_kinds {
        let targets = if kind == ResourceKind::Repos {
            repos.iter().map(Target::repo).collect()
        } else {
            list_account_targets(ctx, kind).await?
        };
        handle(ctx, ios, kind.title(), kind, &targets, report.entry(kind)).await;
    }

    Ok(report)
}
