//! Console rendering of coordinator events and run results

use std::io::{self, Write};

use crate::app::{DownloadStats, Reporter, RunEvent};
use crate::constants::{exit, ui};
use crate::errors::{AppError, DownloadError};

/// Prints events the way a person at a terminal wants to read them
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Writer used for prompts and free-form lines
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints one line; console write failures are not worth aborting a run for
    pub fn line(&mut self, text: impl std::fmt::Display) {
        let _ = writeln!(self.out, "{}", text);
    }

    /// Prints the end-of-run summary
    pub fn summary(&mut self, stats: &DownloadStats) {
        self.line(format!("\n{}", "=".repeat(ui::SEPARATOR_WIDTH)));
        self.line("Download Summary:");
        self.line(format!("Total files: {}", stats.total_files));
        self.line(format!("Successfully downloaded: {}", stats.successful_downloads));
        self.line(format!("Failed downloads: {}", stats.failed_downloads()));
        self.line(format!("\n{}", stats.outcome()));
    }

    /// Prints the message for an error that ended the run and returns the exit code
    pub fn fatal(&mut self, error: &AppError) -> i32 {
        match error {
            AppError::Interrupted => {
                self.line("\nOperation cancelled by user.");
                exit::INTERRUPTED
            }
            e if e.is_remote() => {
                self.line(format!("Error: Could not connect to GitHub API: {}", e));
                self.line("Please check your internet connection and GitHub token.");
                exit::FAILURE
            }
            e => {
                self.line(format!("Unexpected error: {}", e));
                self.line("Please try again or report this issue.");
                exit::FAILURE
            }
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, event: RunEvent<'_>) {
        match event {
            RunEvent::CatalogFeature {
                position,
                feature,
                files,
            } => {
                self.line(format!("{}: {}", position, feature));
                self.line(format!("Feature files: {:?}", files));
            }
            RunEvent::CatalogFeatureUnavailable {
                position,
                feature,
                error,
            } => {
                self.line(format!("{}: {}", position, feature));
                self.line(format!("Warning: Could not list files for {}: {}", feature, error));
            }
            RunEvent::FeatureStarted { feature } => {
                self.line(format!("\nProcessing feature: {}", feature));
            }
            RunEvent::FeatureFailed { feature, error } => {
                self.line(format!("Error processing feature {}: {}", feature, error));
            }
            RunEvent::FileDownloaded { destination, .. } => {
                self.line(format!("File successfully downloaded: {}", destination.display()));
            }
            RunEvent::FileFailed { file, error, .. } => match error {
                DownloadError::Remote(e) => self.line(format!("Error downloading {}: {}", file, e)),
                DownloadError::LocalWrite(e) => self.line(format!("Error saving {}: {}", file, e)),
            },
        }
    }
}
