use std::fmt;

use crate::error::{AppError, Result};
use crate::platform::types::WorkflowRun;

/// Which runs a cleanup removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Keep the given number of newest runs and delete everything older.
    KeepNewest(usize),
    /// Delete every run that concluded with `failure`.
    FailedOnly,
}

/// Result of applying a [`Policy`] to the listed runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    NothingToClean,
    NoCleanupNeeded { total: usize, keep: usize },
    Delete(Vec<u64>),
}

impl Policy {
    /// Build a policy from the raw command-line arguments.
    ///
    /// Fails before any remote call when both a keep count and failed-only mode
    /// are requested, or when the keep count is not a positive integer.
    pub fn from_args(
        keep_count: Option<&str>,
        failed_only: bool,
        default_keep: usize,
    ) -> Result<Self> {
        match (keep_count, failed_only) {
            (Some(_), true) => Err(AppError::Validation(
                "KEEP_COUNT and --failed are mutually exclusive".to_string(),
            )),
            (None, true) => Ok(Policy::FailedOnly),
            (Some(raw), false) => match raw.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(Policy::KeepNewest(n)),
                _ => Err(AppError::Validation(format!(
                    "KEEP_COUNT must be a positive integer, got \"{raw}\""
                ))),
            },
            (None, false) => Ok(Policy::KeepNewest(default_keep)),
        }
    }

    /// Pick the runs to delete. `runs` must be ordered newest first.
    pub fn select(&self, runs: &[WorkflowRun]) -> Selection {
        match *self {
            Policy::FailedOnly => {
                let failed: Vec<u64> = runs
                    .iter()
                    .filter(|run| run.is_failure())
                    .map(|run| run.id)
                    .collect();
                if failed.is_empty() {
                    Selection::NothingToClean
                } else {
                    Selection::Delete(failed)
                }
            }
            Policy::KeepNewest(keep) => {
                if runs.len() <= keep {
                    Selection::NoCleanupNeeded {
                        total: runs.len(),
                        keep,
                    }
                } else {
                    Selection::Delete(runs[keep..].iter().map(|run| run.id).collect())
                }
            }
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::KeepNewest(n) => write!(f, "keep the {n} most recent runs"),
            Policy::FailedOnly => write!(f, "delete all failed runs"),
        }
    }
}
