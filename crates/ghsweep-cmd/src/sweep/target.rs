//! Uniform per-item records built from API payloads.

use ghsweep_api::queries::gist::Gist;
use ghsweep_api::queries::hook::Webhook;
use ghsweep_api::queries::key::{DeployKey, SshKey};
use ghsweep_api::queries::release::Release;
use ghsweep_api::queries::repo::Repository;
use ghsweep_api::queries::secret::Secret;
use ghsweep_core::kind::ResourceKind;

/// One listed item and the path its DELETE goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Resource kind.
    pub kind: ResourceKind,
    /// Short name used in status lines.
    pub label: String,
    /// Inventory row, matching [`columns`].
    pub row: Vec<String>,
    /// API path for the DELETE.
    pub delete_path: String,
}

/// Inventory column headers for a kind.
pub fn columns(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::Repos => &["repository", "visibility", "fork", "archived"],
        ResourceKind::Gists => &["id", "visibility", "description"],
        ResourceKind::SshKeys => &["id", "title"],
        ResourceKind::DeployKeys => &["id", "title", "access"],
        ResourceKind::Webhooks => &["id", "url", "active"],
        ResourceKind::Secrets => &["name", "updated"],
        ResourceKind::Releases => &["id", "tag", "name", "state"],
    }
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}

impl Target {
    /// A repository.
    pub fn repo(repo: &Repository) -> Self {
        Self {
            kind: ResourceKind::Repos,
            label: repo.full_name.clone(),
            row: vec![
                repo.full_name.clone(),
                repo.visibility().to_string(),
                yes_no(repo.fork),
                yes_no(repo.archived),
            ],
            delete_path: repo.api_path(),
        }
    }

    /// A gist.
    pub fn gist(gist: &Gist) -> Self {
        let description = gist
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("-");
        Self {
            kind: ResourceKind::Gists,
            label: gist.id.clone(),
            row: vec![
                gist.id.clone(),
                if gist.public { "public" } else { "secret" }.to_string(),
                description.to_string(),
            ],
            delete_path: gist.api_path(),
        }
    }

    /// An SSH key on the account.
    pub fn ssh_key(key: &SshKey) -> Self {
        Self {
            kind: ResourceKind::SshKeys,
            label: format!("{} ({})", key.id, key.title),
            row: vec![key.id.to_string(), key.title.clone()],
            delete_path: key.api_path(),
        }
    }

    /// A deploy key on `repo`.
    pub fn deploy_key(repo: &Repository, key: &DeployKey) -> Self {
        Self {
            kind: ResourceKind::DeployKeys,
            label: format!("{} ({}) on {}", key.id, key.title, repo.full_name),
            row: vec![
                key.id.to_string(),
                key.title.clone(),
                if key.read_only { "read-only" } else { "read-write" }.to_string(),
            ],
            delete_path: key.api_path(&repo.api_path()),
        }
    }

    /// A webhook on `repo`.
    pub fn webhook(repo: &Repository, hook: &Webhook) -> Self {
        Self {
            kind: ResourceKind::Webhooks,
            label: format!("{} ({}) on {}", hook.id, hook.target_url(), repo.full_name),
            row: vec![
                hook.id.to_string(),
                hook.target_url().to_string(),
                yes_no(hook.active),
            ],
            delete_path: hook.api_path(&repo.api_path()),
        }
    }

    /// An Actions secret on `repo`.
    pub fn secret(repo: &Repository, secret: &Secret) -> Self {
        Self {
            kind: ResourceKind::Secrets,
            label: format!("{} on {}", secret.name, repo.full_name),
            row: vec![
                secret.name.clone(),
                secret.updated_at.clone().unwrap_or_else(|| "-".to_string()),
            ],
            delete_path: secret.api_path(&repo.api_path()),
        }
    }

    /// A release on `repo`.
    pub fn release(repo: &Repository, release: &Release) -> Self {
        Self {
            kind: ResourceKind::Releases,
            label: format!("{} on {}", release.tag_name, repo.full_name),
            row: vec![
                release.id.to_string(),
                release.tag_name.clone(),
                release.name.clone().unwrap_or_default(),
                release.state().to_string(),
            ],
            delete_path: release.api_path(&repo.api_path()),
        }
    }
}
