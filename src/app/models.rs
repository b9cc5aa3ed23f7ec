//! Data models for the remote catalog and download results

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{DownloadError, DownloadResult, RemoteError, RemoteResult};

/// Kind of a directory listing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    /// Symlinks, submodules and anything the host adds later
    #[serde(other)]
    Other,
}

/// One entry of a "list directory contents" response
///
/// The host sends many more fields (sha, size, urls); only the name and the
/// type drive the traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

impl ContentEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_type: EntryType::File,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_type: EntryType::Dir,
        }
    }
}

/// A feature from the catalog together with its file list (or why it could not be listed)
#[derive(Debug)]
pub struct FeatureListing {
    pub name: String,
    pub files: RemoteResult<Vec<String>>,
}

/// Result of listing every feature of the catalog
#[derive(Debug, Default)]
pub struct CatalogListing {
    pub features: Vec<FeatureListing>,
}

impl CatalogListing {
    /// Features whose file list could not be fetched
    pub fn unavailable(&self) -> impl Iterator<Item = (&str, &RemoteError)> {
        self.features
            .iter()
            .filter_map(|f| f.files.as_ref().err().map(|e| (f.name.as_str(), e)))
    }
}

/// A file that made it to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub destination: PathBuf,
    pub bytes: u64,
}

/// Outcome of one file download
#[derive(Debug)]
pub struct FileReport {
    /// Path relative to the feature root
    pub file: String,
    pub result: DownloadResult<DownloadedFile>,
}

impl FileReport {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&DownloadError> {
        self.result.as_ref().err()
    }
}

/// Outcome of downloading one selected feature
#[derive(Debug)]
pub struct FeatureReport {
    pub name: String,
    /// Set when the file list could not be fetched; `files` is then empty
    pub listing_error: Option<RemoteError>,
    pub files: Vec<FileReport>,
}
