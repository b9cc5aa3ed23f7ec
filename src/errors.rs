//! Error types for Feature Fetcher
//!
//! This module defines the error taxonomy shared by every component. Remote and
//! local failures are kept apart so the coordinator can report them differently,
//! and the top-level `AppError` decides which failures end the whole run.

use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to the remote repository host
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Network-level fault or body read failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// URL could not be built from the configured bases
    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Listing response was not the expected JSON array
    #[error("Unexpected listing format from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RemoteError {
    /// HTTP status code when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            RemoteError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Failures writing into the target directory
#[derive(Error, Debug)]
pub enum LocalWriteError {
    /// Directory could not be created
    #[error("Could not create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File could not be written
    #[error("Could not write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Remote path would escape the target directory
    #[error("Refusing to write outside the target directory: {path}")]
    UnsafePath { path: String },
}

/// A single file download can fail on either side of the wire
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    LocalWrite(#[from] LocalWriteError),
}

/// Malformed or out-of-range feature selection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Token is not an integer
    #[error("'{token}' is not a feature number")]
    NotANumber { token: String },

    /// Index outside `1..=max`
    #[error("Invalid feature number: {index}. Valid range: 1-{max}")]
    OutOfRange { index: i64, max: usize },

    /// Valid input that resolves to no features
    #[error("No features selected")]
    NothingSelected,
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Explicitly requested configuration file is missing
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file exists but could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid TOML
    #[error("Invalid configuration format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    /// Value parsed but is not usable
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    LocalWrite(#[from] LocalWriteError),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User pressed Ctrl-C or the process received SIGTERM
    #[error("Operation cancelled by user")]
    Interrupted,

    /// Generic application error with context
    #[error("{message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Whether the error originated on the remote side
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            AppError::Remote(_) | AppError::Download(DownloadError::Remote(_))
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Remote(_) => "remote",
            AppError::LocalWrite(_) => "local-write",
            AppError::Download(DownloadError::Remote(_)) => "remote",
            AppError::Download(DownloadError::LocalWrite(_)) => "local-write",
            AppError::Selection(_) => "selection",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Interrupted => "interrupted",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Remote access result type alias
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Local write result type alias
pub type LocalWriteResult<T> = std::result::Result<T, LocalWriteError>;

/// Download result type alias
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;

/// Selection result type alias
pub type SelectionResult<T> = std::result::Result<T, SelectionError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
