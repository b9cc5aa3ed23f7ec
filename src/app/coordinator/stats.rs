//! Download statistics and the end-of-run classification

use std::fmt;

use serde::{Deserialize, Serialize};

/// Counters accumulated over one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadStats {
    /// Files a download was attempted for
    pub total_files: usize,
    /// Files written to disk
    pub successful_downloads: usize,
}

impl DownloadStats {
    pub fn new(total_files: usize, successful_downloads: usize) -> Self {
        Self {
            total_files,
            successful_downloads,
        }
    }

    /// Count one attempted file
    pub fn record_attempt(&mut self) {
        self.total_files += 1;
    }

    /// Count one file that made it to disk
    pub fn record_success(&mut self) {
        self.successful_downloads += 1;
    }

    pub fn failed_downloads(&self) -> usize {
        self.total_files.saturating_sub(self.successful_downloads)
    }

    /// Classify the run for the summary
    pub fn outcome(&self) -> SummaryOutcome {
        if self.total_files > 0 && self.successful_downloads == self.total_files {
            SummaryOutcome::AllSucceeded
        } else if self.successful_downloads > 0 {
            SummaryOutcome::Partial {
                successful: self.successful_downloads,
                total: self.total_files,
            }
        } else {
            SummaryOutcome::NothingDownloaded
        }
    }
}

/// Overall verdict of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryOutcome {
    AllSucceeded,
    Partial { successful: usize, total: usize },
    /// Also used when nothing was attempted
    NothingDownloaded,
}

impl fmt::Display for SummaryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryOutcome::AllSucceeded => {
                write!(f, "All selected features have been applied successfully!")
            }
            SummaryOutcome::Partial { successful, total } => write!(
                f,
                "Partially completed: {}/{} files downloaded.",
                successful, total
            ),
            SummaryOutcome::NothingDownloaded => write!(
                f,
                "No files were downloaded. Please check your connection and try again."
            ),
        }
    }
}
