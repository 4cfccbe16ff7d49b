//! Per-item outcomes and the end-of-run summary.

use ghsweep_api::client::DeleteResponse;
use ghsweep_api::errors::ApiError;
use ghsweep_core::iostreams::IOStreams;
use ghsweep_core::kind::ResourceKind;
use ghsweep_core::table::TablePrinter;

use crate::guard::{ARM_ENV, ARM_PHRASE, ExecutionMode};

/// What happened to one DELETE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The API answered `204 No Content`.
    Deleted,
    /// The API answered with any other status.
    Failed {
        /// HTTP status code.
        status: u16,
        /// Error message from the body, often empty.
        message: String,
        /// Missing-scope hint, if the response headers gave one.
        suggestion: Option<String>,
    },
    /// No response was received.
    Error(String),
}

impl DeleteOutcome {
    /// Classify the result of [`Client::delete`](ghsweep_api::client::Client::delete).
    pub fn from_result(result: Result<DeleteResponse, ApiError>) -> Self {
        match result {
            Ok(resp) if resp.is_deleted() => Self::Deleted,
            Ok(resp) => Self::Failed {
                status: resp.status,
                message: resp.message,
                suggestion: resp.scopes_suggestion,
            },
            Err(e) => Self::Error(e.to_string()),
        }
    }

    /// Whether the item is gone.
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }

    /// One-line reason for a failure, `None` on success.
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Deleted => None,
            Self::Failed {
                status,
                message,
                suggestion,
            } => {
                let mut reason = format!("HTTP {status}");
                if !message.is_empty() {
                    reason.push_str(": ");
                    reason.push_str(message);
                }
                if let Some(hint) = suggestion {
                    reason.push_str(&format!(" ({hint})"));
                }
                Some(reason)
            }
            Self::Error(message) => Some(message.clone()),
        }
    }
}

/// Counters for one resource kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindReport {
    /// The kind counted.
    pub kind: ResourceKind,
    /// Items listed.
    pub listed: usize,
    /// Items deleted.
    pub deleted: usize,
    /// Deletes that did not succeed.
    pub failed: usize,
}

impl KindReport {
    fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            listed: 0,
            deleted: 0,
            failed: 0,
        }
    }

    /// Count one delete outcome.
    pub fn record(&mut self, outcome: &DeleteOutcome) {
        if outcome.is_deleted() {
            self.deleted += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Totals for a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepReport {
    /// Mode the run executed in.
    pub mode: ExecutionMode,
    /// One entry per selected kind, in processing order.
    pub kinds: Vec<KindReport>,
}

impl SweepReport {
    /// Start an empty report for the selected kinds.
    pub fn new(mode: ExecutionMode, kinds: &[ResourceKind]) -> Self {
        Self {
            mode,
            kinds: kinds.iter().copied().map(KindReport::new).collect(),
        }
    }

    /// Counters for `kind`, added on first use.
    pub fn entry(&mut self, kind: ResourceKind) -> &mut KindReport {
        let idx = match self.kinds.iter().position(|k| k.kind == kind) {
            Some(idx) => idx,
            None => {
                self.kinds.push(KindReport::new(kind));
                self.kinds.len() - 1
            }
        };
        &mut self.kinds[idx]
    }

    /// Counters for `kind`, if it was selected.
    pub fn get(&self, kind: ResourceKind) -> Option<&KindReport> {
        self.kinds.iter().find(|k| k.kind == kind)
    }

    /// Items listed across all kinds.
    pub fn total_listed(&self) -> usize {
        self.kinds.iter().map(|k| k.listed).sum()
    }

    /// Items deleted across all kinds.
    pub fn total_deleted(&self) -> usize {
        self.kinds.iter().map(|k| k.deleted).sum()
    }

    /// Failed deletes across all kinds.
    pub fn total_failed(&self) -> usize {
        self.kinds.iter().map(|k| k.failed).sum()
    }

    /// Render the summary table and closing line.
    pub fn render(&self, ios: &IOStreams) -> String {
        let mut tp = TablePrinter::new(ios).with_headers(&["kind", "listed", "deleted", "failed"]);
        for k in &self.kinds {
            tp.add_row(vec![
                k.kind.as_str().to_string(),
                k.listed.to_string(),
                k.deleted.to_string(),
                k.failed.to_string(),
            ]);
        }

        let closing = match self.mode {
            ExecutionMode::DryRun => format!(
                "Dry run: {} items listed, nothing was deleted. Set {ARM_ENV}={ARM_PHRASE} to delete them.",
                self.total_listed()
            ),
            ExecutionMode::Armed => format!(
                "Deleted {} of {} items, {} failed.",
                self.total_deleted(),
                self.total_listed(),
                self.total_failed()
            ),
        };

        format!("{}\n{closing}", tp.render())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn response(status: u16, hint: Option<&str>) -> DeleteResponse {
        DeleteResponse {
            status,
            message: if status >= 400 { "Not Found".to_string() } else { String::new() },
            scopes_suggestion: hint.map(str::to_string),
        }
    }

    #[test]
    fn test_should_classify_delete_results() {
        assert_eq!(
            DeleteOutcome::from_result(Ok(response(204, None))),
            DeleteOutcome::Deleted
        );
        assert_eq!(
            DeleteOutcome::from_result(Ok(response(200, None))),
            DeleteOutcome::Failed {
                status: 200,
                message: String::new(),
                suggestion: None
            }
        );
        let err = ApiError::UnexpectedShape("boom".to_string());
        assert!(matches!(
            DeleteOutcome::from_result(Err(err)),
            DeleteOutcome::Error(ref m) if m.contains("boom")
        ));
    }

    #[test]
    fn test_should_explain_failures() {
        let outcome = DeleteOutcome::Failed {
            status: 403,
            message: "Must have admin rights to Repository.".to_string(),
            suggestion: Some("needs delete_repo".to_string()),
        };
        assert_eq!(
            outcome.reason().unwrap(),
            "HTTP 403: Must have admin rights to Repository. (needs delete_repo)"
        );
        assert_eq!(
            DeleteOutcome::from_result(Ok(response(404, None))).reason().unwrap(),
            "HTTP 404: Not Found"
        );
        let bare = DeleteOutcome::Failed {
            status: 502,
            message: String::new(),
            suggestion: None,
        };
        assert_eq!(bare.reason().unwrap(), "HTTP 502");
        assert!(DeleteOutcome::Deleted.reason().is_none());
    }

    #[test]
    fn test_should_count_outcomes_per_kind() {
        let mut report = SweepReport::new(
            ExecutionMode::Armed,
            &[ResourceKind::Repos, ResourceKind::Gists],
        );
        report.entry(ResourceKind::Gists).listed = 3;
        report.entry(ResourceKind::Gists).record(&DeleteOutcome::Deleted);
        report.entry(ResourceKind::Gists).record(&DeleteOutcome::Deleted);
        report
            .entry(ResourceKind::Gists)
            .record(&DeleteOutcome::Error("reset".into()));

        let gists = report.get(ResourceKind::Gists).unwrap();
        assert_eq!((gists.listed, gists.deleted, gists.failed), (3, 2, 1));
        assert_eq!(report.total_deleted(), 2);
        assert_eq!(report.total_failed(), 1);
        assert_eq!(report.get(ResourceKind::Repos).unwrap().listed, 0);
    }

    #[test]
    fn test_should_add_unselected_kind_on_first_use() {
        let mut report = SweepReport::new(ExecutionMode::DryRun, &[]);
        report.entry(ResourceKind::SshKeys).listed = 1;
        assert_eq!(report.kinds.len(), 1);
    }

    #[test]
    fn test_should_render_plain_summary_for_dry_run() {
        let (ios, _) = IOStreams::test_with_output();
        let mut report = SweepReport::new(ExecutionMode::DryRun, &[ResourceKind::Gists]);
        report.entry(ResourceKind::Gists).listed = 2;

        let out = report.render(&ios);
        assert_eq!(
            out,
            "gists\t2\t0\t0\nDry run: 2 items listed, nothing was deleted. \
             Set GHSWEEP_ARM=delete-everything-i-own to delete them."
        );
    }

    #[test]
    fn test_should_render_totals_when_armed() {
        let (ios, _) = IOStreams::test_with_output();
        let mut report = SweepReport::new(ExecutionMode::Armed, &[ResourceKind::SshKeys]);
        let keys = report.entry(ResourceKind::SshKeys);
        keys.listed = 2;
        keys.record(&DeleteOutcome::Deleted);
        keys.record(&DeleteOutcome::Failed {
            status: 404,
            message: String::new(),
            suggestion: None,
        });

        assert!(report.render(&ios).ends_with("Deleted 1 of 2 items, 1 failed."));
    }
}
