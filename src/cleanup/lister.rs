use crate::error::Result;
use crate::platform::types::{Repository, WorkflowRun};
use crate::platform::Platform;

/// Fetch every workflow run of `repo`, newest first.
///
/// Pages are requested until one comes back short or the `total_count` of the
/// first page has been reached. Any failed page fails the whole listing; a
/// partial list is never returned.
pub async fn list_all_runs(
    platform: &dyn Platform,
    repo: &Repository,
    page_size: u8,
) -> Result<Vec<WorkflowRun>> {
    let mut runs: Vec<WorkflowRun> = Vec::new();
    let mut total_count: Option<u64> = None;
    let mut page = 1;

    loop {
        let batch = platform.list_runs_page(repo, page, page_size).await?;
        let expected = *total_count.get_or_insert(batch.total_count);
        let fetched = batch.runs.len();
        runs.extend(batch.runs);

        tracing::debug!(
            repo = %repo,
            page = page,
            fetched = fetched,
            accumulated = runs.len(),
            total_count = expected,
            "Fetched workflow runs page"
        );

        if fetched < page_size as usize || runs.len() as u64 >= expected {
            break;
        }
        page += 1;
    }

    sort_newest_first(&mut runs);

    tracing::info!(repo = %repo, count = runs.len(), pages = page, "Listed workflow runs");
    Ok(runs)
}

/// Order by creation time, newest first, when every run has a timestamp.
///
/// The API already lists newest first; the stable sort keeps that order for
/// ties and leaves the list untouched if any timestamp is missing.
fn sort_newest_first(runs: &mut [WorkflowRun]) {
    if runs.iter().all(|run| run.created_at.is_some()) {
        runs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}
