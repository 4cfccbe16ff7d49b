//! Resource kinds a sweep can enumerate and delete.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A kind of GitHub resource handled by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Deploy keys of each repository.
    DeployKeys,
    /// Webhooks of each repository.
    Webhooks,
    /// Actions secrets of each repository.
    Secrets,
    /// Releases of each repository.
    Releases,
    /// Repositories owned by the user.
    Repos,
    /// Gists owned by the user.
    Gists,
    /// SSH keys on the user account.
    SshKeys,
}

impl ResourceKind {
    /// Every kind, in processing order.
    ///
    /// Repository-scoped kinds come first so they never target a repository
    /// that has already been deleted.
    pub const ALL: [Self; 7] = [
        Self::DeployKeys,
        Self::Webhooks,
        Self::Secrets,
        Self::Releases,
        Self::Repos,
        Self::Gists,
        Self::SshKeys,
    ];

    /// The identifier used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeployKeys => "deploy-keys",
            Self::Webhooks => "webhooks",
            Self::Secrets => "secrets",
            Self::Releases => "releases",
            Self::Repos => "repos",
            Self::Gists => "gists",
            Self::SshKeys => "ssh-keys",
        }
    }

    /// Human-readable plural title for inventory headings.
    pub fn title(self) -> &'static str {
        match self {
            Self::DeployKeys => "Deploy keys",
            Self::Webhooks => "Webhooks",
            Self::Secrets => "Actions secrets",
            Self::Releases => "Releases",
            Self::Repos => "Repositories",
            Self::Gists => "Gists",
            Self::SshKeys => "SSH keys",
        }
    }

    /// Singular noun used in per-item status lines.
    pub fn noun(self) -> &'static str {
        match self {
            Self::DeployKeys => "deploy key",
            Self::Webhooks => "webhook",
            Self::Secrets => "secret",
            Self::Releases => "release",
            Self::Repos => "repository",
            Self::Gists => "gist",
            Self::SshKeys => "SSH key",
        }
    }

    /// Whether this kind lives inside a repository.
    pub fn is_repo_scoped(self) -> bool {
        matches!(
            self,
            Self::DeployKeys | Self::Webhooks | Self::Secrets | Self::Releases
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown resource kind.
#[derive(Debug, thiserror::Error)]
#[error(
    "unknown resource kind {name:?}: expected one of {all}",
    name = .0,
    all = ResourceKind::ALL.map(ResourceKind::as_str).join(", ")
)]
pub struct UnknownKindError(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKindError(s.to_string()))
    }
}
