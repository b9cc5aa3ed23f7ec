//! The seam between the coordinator and the remote host
//!
//! `GitHubClient` is the production implementation; tests drive the
//! coordinator with in-memory sources.

use std::path::Path;

use url::Url;

use crate::errors::{DownloadResult, RemoteResult};

/// Read-only access to a features catalog
#[allow(async_fn_in_trait)]
pub trait FeatureSource {
    /// Names of the available features, in catalog order
    async fn fetch_available_features(&self) -> RemoteResult<Vec<String>>;

    /// Relative paths of every file inside `feature`
    async fn fetch_feature_files(&self, feature: &str) -> RemoteResult<Vec<String>>;

    /// Download URL of one file of a feature
    fn file_url(&self, feature: &str, file: &str) -> RemoteResult<Url>;

    /// Downloads `url` into `destination` and returns the number of bytes written
    async fn download_file(&self, url: &Url, destination: &Path) -> DownloadResult<u64>;
}
