//! The interactive run
//!
//! Fetch the catalog, show it, ask which features to apply and where, then
//! download and summarise. An invalid selection or an unusable target
//! directory ends the run before any download starts.

use std::io::Write;

use tokio::io::AsyncBufRead;
use tracing::{info, warn};

use crate::app::{
    parse_selection, resolve_target_directory, Coordinator, DownloadReport, FeatureSource,
};
use crate::cli::prompt::ask;
use crate::cli::report::ConsoleReporter;
use crate::errors::Result;

const SELECTION_PROMPT: &str =
    "\nEnter the number of the feature you want to apply using comma (or 'all' to apply all features): ";

const TARGET_PROMPT: &str = "In which directory should the files be downloaded? (Enter = current): ";

/// How an interactive run ended, short of a fatal error
#[derive(Debug)]
pub enum RunOutcome {
    /// Downloads were attempted; the report holds the per-file results
    Completed(DownloadReport),
    /// The selection was invalid or empty
    SelectionRejected,
    /// The target directory could not be created
    TargetUnavailable,
}

/// Runs the whole interactive flow
///
/// # Errors
///
/// Returns `AppError::Remote` if the catalog cannot be fetched, and I/O errors
/// from the prompts. Per-feature and per-file failures are reported and
/// counted, never returned.
pub async fn run_interactive<S, R, W>(
    coordinator: &Coordinator<S>,
    input: &mut R,
    console: &mut ConsoleReporter<W>,
) -> Result<RunOutcome>
where
    S: FeatureSource,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    console.line("Fetching available features...");
    let features = coordinator.fetch_catalog().await?;

    console.line("Available features:\n");
    let listing = coordinator.describe_catalog(&features, console).await;
    let unavailable = listing.unavailable().count();
    if unavailable > 0 {
        warn!("{} of {} features could not be listed", unavailable, features.len());
    }

    let raw_selection = ask(input, console.writer(), SELECTION_PROMPT).await?;
    let chosen = match parse_selection(&raw_selection, &features) {
        Ok(chosen) => chosen,
        Err(e) => {
            console.line(format!("Error: Invalid input - {}", e));
            console.line("Please enter comma-separated numbers or 'all'");
            return Ok(RunOutcome::SelectionRejected);
        }
    };

    let raw_target = ask(input, console.writer(), TARGET_PROMPT).await?;
    let target_dir = match resolve_target_directory(&raw_target).await {
        Ok(dir) => dir,
        Err(e) => {
            console.line(format!("Error: {}", e));
            return Ok(RunOutcome::TargetUnavailable);
        }
    };
    let shown = tokio::fs::canonicalize(&target_dir)
        .await
        .unwrap_or_else(|_| target_dir.clone());
    console.line(format!("Target directory: {}", shown.display()));

    info!("Applying {} features into {}", chosen.len(), target_dir.display());
    let report = coordinator
        .download_features(&chosen, &target_dir, console)
        .await;

    console.summary(&report.stats);
    Ok(RunOutcome::Completed(report))
}
