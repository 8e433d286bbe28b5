pub mod confirm;
pub mod lister;
pub mod policy;
pub mod types;

use std::io::{BufRead, Write};
use std::time::Duration;

use crate::config::CleanupConfig;
use crate::error::Result;
use crate::platform::types::Repository;
use crate::platform::Platform;

use policy::{Policy, Selection};
use types::{CleanupOutcome, CleanupSummary};

/// Everything one cleanup invocation needs, resolved from arguments and config.
#[derive(Debug, Clone)]
pub struct CleanupOptions {
    pub policy: Policy,
    /// Skip the confirmation prompt.
    pub auto_confirm: bool,
    pub page_size: u8,
    /// Deletions between pauses.
    pub batch_size: usize,
    pub batch_pause: Duration,
}

impl CleanupOptions {
    pub fn new(policy: Policy, auto_confirm: bool, config: &CleanupConfig) -> Self {
        Self {
            policy,
            auto_confirm,
            page_size: config.page_size,
            batch_size: config.batch_size.max(1),
            batch_pause: config.batch_pause(),
        }
    }
}

/// List, select, confirm and delete workflow runs of `repo`.
///
/// Listing failures are returned as errors before anything is deleted.
/// Individual delete failures are counted in the summary and never abort the loop.
pub async fn run_cleanup<R: BufRead, W: Write>(
    platform: &dyn Platform,
    repo: &Repository,
    options: &CleanupOptions,
    input: &mut R,
    out: &mut W,
) -> Result<CleanupOutcome> {
    writeln!(out, "🧹 GitHub Actions Run Cleanup ({repo})")?;
    match options.policy {
        Policy::FailedOnly => writeln!(out, "🚫 Deleting all failed runs...")?,
        Policy::KeepNewest(keep) => writeln!(out, "📊 Keeping the {keep} most recent runs...")?,
    }
    writeln!(out)?;
    writeln!(out, "📈 Analyzing workflow runs...")?;

    let runs = lister::list_all_runs(platform, repo, options.page_size).await?;

    let run_ids = match options.policy.select(&runs) {
        Selection::NothingToClean => {
            writeln!(out, "   Found 0 failed runs")?;
            writeln!(out, "✅ No failed runs found - nothing to clean up")?;
            return Ok(CleanupOutcome::NothingToClean);
        }
        Selection::NoCleanupNeeded { total, keep } => {
            writeln!(out, "   Found {total} total runs")?;
            writeln!(
                out,
                "✅ No cleanup needed - only {total} runs found (keeping {keep})"
            )?;
            return Ok(CleanupOutcome::NoCleanupNeeded { total, keep });
        }
        Selection::Delete(run_ids) => run_ids,
    };

    match options.policy {
        Policy::FailedOnly => {
            writeln!(out, "   Found {} failed runs", run_ids.len())?;
            writeln!(out, "🗑️  Will delete all {} failed runs", run_ids.len())?;
        }
        Policy::KeepNewest(keep) => {
            writeln!(out, "   Found {} total runs", runs.len())?;
            writeln!(
                out,
                "🗑️  Will delete {} old runs (keeping newest {keep})",
                run_ids.len()
            )?;
        }
    }
    writeln!(out)?;

    tracing::info!(
        repo = %repo,
        policy = %options.policy,
        listed = runs.len(),
        selected = run_ids.len(),
        "Selected workflow runs for deletion"
    );

    if options.auto_confirm {
        writeln!(out, "⚡ Auto-confirming deletion (--yes flag used)")?;
    } else {
        let kind = match options.policy {
            Policy::FailedOnly => "failed workflow runs",
            Policy::KeepNewest(_) => "workflow runs",
        };
        writeln!(
            out,
            "⚠️  This will permanently delete {} {kind}.",
            run_ids.len()
        )?;
        if !confirm::confirm(input, out, "Continue?")? {
            writeln!(out, "❌ Cleanup cancelled")?;
            tracing::info!(repo = %repo, "Cleanup cancelled at confirmation prompt");
            return Ok(CleanupOutcome::Cancelled);
        }
    }

    writeln!(out)?;
    match options.policy {
        Policy::FailedOnly => writeln!(out, "🗑️  Deleting failed runs...")?,
        Policy::KeepNewest(_) => writeln!(out, "🗑️  Deleting old runs...")?,
    }

    let summary = delete_runs(platform, repo, &run_ids, options, out).await?;
    report(&summary, out)?;

    Ok(CleanupOutcome::Completed(summary))
}

/// Delete `run_ids` one by one, pausing after every full batch while more remain.
async fn delete_runs<W: Write>(
    platform: &dyn Platform,
    repo: &Repository,
    run_ids: &[u64],
    options: &CleanupOptions,
    out: &mut W,
) -> Result<CleanupSummary> {
    let mut summary = CleanupSummary {
        policy: options.policy,
        deleted: 0,
        failed: 0,
    };

    for (index, &run_id) in run_ids.iter().enumerate() {
        write!(out, "   Deleting run {run_id}... ")?;
        out.flush()?;

        match platform.delete_run(repo, run_id).await {
            Ok(()) => {
                writeln!(out, "✅")?;
                summary.deleted += 1;
            }
            Err(e) => {
                // Already-deleted runs land here too; they are counted like any other failure.
                writeln!(out, "❌ (failed or already deleted)")?;
                tracing::warn!(
                    repo = %repo,
                    run_id = run_id,
                    error = %e,
                    "Failed to delete workflow run"
                );
                summary.failed += 1;
            }
        }

        let more_batches = pause_after(index, run_ids.len(), options.batch_size);
        if more_batches && !options.batch_pause.is_zero() {
            tracing::debug!(
                completed = index + 1,
                pause_ms = options.batch_pause.as_millis() as u64,
                "Pausing between deletion batches"
            );
            tokio::time::sleep(options.batch_pause).await;
        }
    }

    tracing::info!(
        repo = %repo,
        deleted = summary.deleted,
        failed = summary.failed,
        "Deletion pass finished"
    );

    Ok(summary)
}

/// True when the deletion at `index` completes a batch and more deletions follow.
fn pause_after(index: usize, total: usize, batch_size: usize) -> bool {
    (index + 1) % batch_size == 0 && index + 1 < total
}

fn report<W: Write>(summary: &CleanupSummary, out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "📊 Cleanup Summary:")?;
    writeln!(out, "   ✅ Successfully deleted: {} runs", summary.deleted)?;
    if summary.failed > 0 {
        writeln!(out, "   ❌ Failed to delete: {} runs", summary.failed)?;
    }
    match summary.policy {
        Policy::FailedOnly => writeln!(out, "   🚫 Deleted all failed runs")?,
        Policy::KeepNewest(keep) => writeln!(out, "   📈 Remaining runs: {keep} (newest)")?,
    }
    writeln!(out)?;
    writeln!(out, "🎉 Cleanup completed!")?;
    Ok(())
}
