use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Conclusion GitHub reports for a run that failed.
pub const CONCLUSION_FAILURE: &str = "failure";

/// A GitHub repository identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// One GitHub Actions workflow run, as much of it as cleanup needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,
    /// `None` while the run is still in progress.
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl WorkflowRun {
    pub fn is_failure(&self) -> bool {
        self.conclusion.as_deref() == Some(CONCLUSION_FAILURE)
    }
}

/// A single page of the runs listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RunsPage {
    pub total_count: u64,
    #[serde(rename = "workflow_runs")]
    pub runs: Vec<WorkflowRun>,
}
