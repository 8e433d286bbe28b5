pub mod github;
pub mod types;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;

use crate::error::Result;
use types::*;

#[async_trait]
pub trait Platform: Send + Sync {
    /// Fetch one page of workflow runs, newest first. Pages are 1-based.
    async fn list_runs_page(&self, repo: &Repository, page: u32, per_page: u8)
        -> Result<RunsPage>;

    /// Delete a single workflow run.
    async fn delete_run(&self, repo: &Repository, run_id: u64) -> Result<()>;
}
