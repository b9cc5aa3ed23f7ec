//! HTTP client for the features repository
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and remote endpoint layout
//! - `http`: Core HTTP operations with bearer authentication
//! - `catalog`: Feature and file listing
//! - `download`: File download and local writes

use std::path::Path;

use url::Url;

use crate::app::source::FeatureSource;
use crate::errors::{DownloadResult, RemoteResult};

pub mod catalog;
pub mod config;
pub mod download;
pub mod http;

pub use config::{ClientConfig, RemoteConfig};
pub use download::{local_destination, write_file};

use catalog::CatalogHandler;
use download::DownloadHandler;
use http::HttpHandler;

/// Client for a features directory hosted on GitHub
///
/// All configuration is passed in at construction; nothing is read from the
/// environment here.
#[derive(Debug)]
pub struct GitHubClient {
    http_handler: HttpHandler,
    remote: RemoteConfig,
}

impl GitHubClient {
    /// Creates a client for the default remote with default HTTP settings
    pub fn new() -> RemoteResult<Self> {
        Self::with_config(RemoteConfig::default(), ClientConfig::default())
    }

    /// Creates a client for `remote` using the given HTTP settings
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Http` if the HTTP client cannot be built
    pub fn with_config(remote: RemoteConfig, config: ClientConfig) -> RemoteResult<Self> {
        let client = config.build_http_client()?;
        let http_handler = HttpHandler::new(client, remote.token.clone());

        tracing::info!(
            "Created client for {} ({}, {})",
            remote.slug(),
            remote.branch,
            if http_handler.is_authenticated() {
                "authenticated"
            } else {
                "unauthenticated"
            }
        );

        Ok(Self {
            http_handler,
            remote,
        })
    }

    /// Remote this client reads from
    pub fn remote(&self) -> &RemoteConfig {
        &self.remote
    }

    fn catalog(&self) -> CatalogHandler<'_> {
        CatalogHandler::new(&self.http_handler, &self.remote)
    }
}

impl FeatureSource for GitHubClient {
    async fn fetch_available_features(&self) -> RemoteResult<Vec<String>> {
        self.catalog().fetch_available_features().await
    }

    async fn fetch_feature_files(&self, feature: &str) -> RemoteResult<Vec<String>> {
        self.catalog().fetch_feature_files(feature).await
    }

    fn file_url(&self, feature: &str, file: &str) -> RemoteResult<Url> {
        self.remote.raw_file_url(feature, file)
    }

    async fn download_file(&self, url: &Url, destination: &Path) -> DownloadResult<u64> {
        DownloadHandler::new(&self.http_handler)
            .download_file(url, destination)
            .await
    }
}
