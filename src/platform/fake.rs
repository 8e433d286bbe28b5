use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::platform::types::*;
use crate::platform::Platform;

/// In-memory platform serving a fixed run list and recording every call.
#[derive(Default)]
pub struct FakePlatform {
    runs: Vec<WorkflowRun>,
    total_count: Option<u64>,
    failing_page: Option<u32>,
    failing_deletes: HashSet<u64>,
    pub page_requests: Mutex<Vec<u32>>,
    pub delete_requests: Mutex<Vec<u64>>,
}

impl FakePlatform {
    pub fn with_runs(runs: Vec<WorkflowRun>) -> Self {
        Self {
            runs,
            ..Default::default()
        }
    }

    /// Report a `total_count` different from the number of runs served.
    pub fn reporting_total(mut self, total: u64) -> Self {
        self.total_count = Some(total);
        self
    }

    pub fn failing_page(mut self, page: u32) -> Self {
        self.failing_page = Some(page);
        self
    }

    pub fn failing_delete(mut self, run_id: u64) -> Self {
        self.failing_deletes.insert(run_id);
        self
    }

    pub fn pages_fetched(&self) -> Vec<u32> {
        self.page_requests.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<u64> {
        self.delete_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Platform for FakePlatform {
    async fn list_runs_page(
        &self,
        _repo: &Repository,
        page: u32,
        per_page: u8,
    ) -> Result<RunsPage> {
        self.page_requests.lock().unwrap().push(page);

        if self.failing_page == Some(page) {
            return Err(AppError::GitHubApi(format!("page {page} unavailable")));
        }

        let per_page = per_page as usize;
        let start = (page as usize - 1) * per_page;
        let runs = self
            .runs
            .iter()
            .skip(start)
            .take(per_page)
            .cloned()
            .collect();

        Ok(RunsPage {
            total_count: self.total_count.unwrap_or(self.runs.len() as u64),
            runs,
        })
    }

    async fn delete_run(&self, _repo: &Repository, run_id: u64) -> Result<()> {
        self.delete_requests.lock().unwrap().push(run_id);

        if self.failing_deletes.contains(&run_id) {
            return Err(AppError::GitHubApi(format!("run {run_id} not found")));
        }
        Ok(())
    }
}

/// Build `count` runs with descending ids (newest first), conclusion `success`.
pub fn runs(count: u64) -> Vec<WorkflowRun> {
    (0..count)
        .map(|i| WorkflowRun {
            id: 1000 - i,
            conclusion: Some("success".to_string()),
            created_at: None,
        })
        .collect()
}

pub fn run_with(id: u64, conclusion: Option<&str>) -> WorkflowRun {
    WorkflowRun {
        id,
        conclusion: conclusion.map(str::to_string),
        created_at: None,
    }
}
