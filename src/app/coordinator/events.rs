//! Events emitted while the coordinator works
//!
//! The coordinator never prints. It hands every per-item result to a
//! `Reporter` as it happens and returns the same data in structured form when
//! the step completes.

use std::path::Path;

use crate::errors::{DownloadError, RemoteError};

/// Something worth telling the user about
#[derive(Debug, Clone, Copy)]
pub enum RunEvent<'a> {
    /// A catalog entry and its files, for the overview (position is 1-based)
    CatalogFeature {
        position: usize,
        feature: &'a str,
        files: &'a [String],
    },
    /// A catalog entry whose files could not be listed for the overview
    CatalogFeatureUnavailable {
        position: usize,
        feature: &'a str,
        error: &'a RemoteError,
    },
    /// Downloading a selected feature begins
    FeatureStarted { feature: &'a str },
    /// A selected feature could not be listed; its files are skipped
    FeatureFailed {
        feature: &'a str,
        error: &'a RemoteError,
    },
    /// A file was written
    FileDownloaded {
        feature: &'a str,
        file: &'a str,
        destination: &'a Path,
        bytes: u64,
    },
    /// A file could not be fetched or written
    FileFailed {
        feature: &'a str,
        file: &'a str,
        error: &'a DownloadError,
    },
}

/// Receives coordinator events
pub trait Reporter {
    fn report(&mut self, event: RunEvent<'_>);
}
