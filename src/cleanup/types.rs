use super::policy::Policy;

/// Counts from one pass of the delete loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupSummary {
    pub policy: Policy,
    pub deleted: usize,
    pub failed: usize,
}

impl CleanupSummary {
    pub fn attempted(&self) -> usize {
        self.deleted + self.failed
    }
}

/// How a cleanup invocation ended. None of these are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// Failed-only mode found no failed runs.
    NothingToClean,
    /// Keep-newest mode found no more runs than it keeps.
    NoCleanupNeeded { total: usize, keep: usize },
    /// The confirmation prompt was declined.
    Cancelled,
    /// Deletions were attempted; individual failures are counted in the summary.
    Completed(CleanupSummary),
}
