//! File download operations
//!
//! Downloads are written straight to their destination. There is no temp file
//! and no rename: a write that fails part way leaves a truncated file behind,
//! and the only recovery is downloading the file again.

use std::path::{Component, Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::app::client::http::HttpHandler;
use crate::errors::{DownloadResult, LocalWriteError, LocalWriteResult};

/// File download operations handler
pub struct DownloadHandler<'a> {
    http_handler: &'a HttpHandler,
}

impl<'a> DownloadHandler<'a> {
    /// Creates a new DownloadHandler with the given HTTP handler
    pub fn new(http_handler: &'a HttpHandler) -> Self {
        Self { http_handler }
    }

    /// Downloads `url` into `destination`, creating missing parent directories
    ///
    /// Returns the number of bytes written. Existing files are overwritten.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError::Remote` if the request fails and
    /// `DownloadError::LocalWrite` if the directory or file cannot be written.
    pub async fn download_file(&self, url: &Url, destination: &Path) -> DownloadResult<u64> {
        let bytes = self.http_handler.get_bytes(url).await?;
        let written = write_file(destination, &bytes).await?;
        tracing::info!("Successfully downloaded: {}", destination.display());
        Ok(written)
    }
}

/// Writes `contents` to `destination`, creating parent directories first
pub async fn write_file(destination: &Path, contents: &[u8]) -> LocalWriteResult<u64> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| LocalWriteError::CreateDirectory {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
    }

    let write_error = |source| LocalWriteError::Write {
        path: destination.to_path_buf(),
        source,
    };

    let mut file = File::create(destination).await.map_err(write_error)?;
    file.write_all(contents).await.map_err(write_error)?;
    file.flush().await.map_err(write_error)?;

    Ok(contents.len() as u64)
}

/// Maps a remote relative path onto `target_dir`
///
/// Remote paths always use `/`. Empty, `.` and `..` segments, and segments
/// that the local platform would read as more than one component, are
/// rejected so nothing lands outside `target_dir`.
pub fn local_destination(target_dir: &Path, relative: &str) -> LocalWriteResult<PathBuf> {
    let unsafe_path = || LocalWriteError::UnsafePath {
        path: relative.to_string(),
    };

    let mut destination = target_dir.to_path_buf();
    for segment in relative.split('/') {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == segment => destination.push(name),
            _ => return Err(unsafe_path()),
        }
    }

    Ok(destination)
}
