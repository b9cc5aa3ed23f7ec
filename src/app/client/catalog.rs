//! Catalog listing against the "list directory contents" endpoint
//!
//! The endpoint returns exactly one directory level per call, so the file list
//! of a feature is built by walking its subdirectories. The walk keeps an
//! explicit stack of open directories instead of recursing; files come out in
//! the same depth-first order a recursive walk would produce them.

use std::vec;

use tracing::debug;

use crate::app::client::config::RemoteConfig;
use crate::app::client::http::HttpHandler;
use crate::app::models::{ContentEntry, EntryType};
use crate::constants::github;
use crate::errors::RemoteResult;

/// Catalog operations handler
pub struct CatalogHandler<'a> {
    http_handler: &'a HttpHandler,
    remote: &'a RemoteConfig,
}

impl<'a> CatalogHandler<'a> {
    pub fn new(http_handler: &'a HttpHandler, remote: &'a RemoteConfig) -> Self {
        Self {
            http_handler,
            remote,
        }
    }

    /// Lists one directory below the features directory
    pub async fn list_directory(&self, path: &str) -> RemoteResult<Vec<ContentEntry>> {
        let url = self.remote.contents_url(path)?;
        let entries: Vec<ContentEntry> = self
            .http_handler
            .get_json(&url, github::ACCEPT_JSON)
            .await?;
        debug!("Listed {} entries under '{}'", entries.len(), path);
        Ok(entries)
    }

    /// Names of all top-level entries of the features directory, in listing order
    pub async fn fetch_available_features(&self) -> RemoteResult<Vec<String>> {
        let entries = self.list_directory("").await?;
        Ok(entries.into_iter().map(|entry| entry.name).collect())
    }

    /// Relative paths of every file in `feature`, subdirectories included
    ///
    /// A file `helper.py` inside directory `sub` is reported as `sub/helper.py`.
    /// A failure listing any directory, at any depth, fails the whole call.
    pub async fn fetch_feature_files(&self, feature: &str) -> RemoteResult<Vec<String>> {
        let mut files = Vec::new();

        // (prefix relative to the feature root, remaining entries of that directory)
        let mut pending: Vec<(String, vec::IntoIter<ContentEntry>)> =
            vec![(String::new(), self.list_directory(feature).await?.into_iter())];

        while let Some((prefix, entries)) = pending.last_mut() {
            let Some(entry) = entries.next() else {
                pending.pop();
                continue;
            };

            let relative = format!("{}{}", prefix, entry.name);
            match entry.entry_type {
                EntryType::File => files.push(relative),
                EntryType::Dir => {
                    let listing = self
                        .list_directory(&format!("{}/{}", feature, relative))
                        .await?;
                    pending.push((format!("{}/", relative), listing.into_iter()));
                }
                EntryType::Other => debug!("Skipping non-file entry {}/{}", feature, relative),
            }
        }

        Ok(files)
    }
}
