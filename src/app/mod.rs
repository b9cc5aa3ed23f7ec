//! Core application logic for Feature Fetcher
//!
//! This module contains the remote client, the selection logic and the
//! coordinator that ties them together. Nothing in here prints; console output
//! lives in `crate::cli`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use feature_fetcher::app::{Coordinator, GitHubClient, Reporter, RunEvent};
//! use std::path::Path;
//!
//! struct Quiet;
//!
//! impl Reporter for Quiet {
//!     fn report(&mut self, _event: RunEvent<'_>) {}
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let coordinator = Coordinator::new(GitHubClient::new()?);
//! let features = coordinator.fetch_catalog().await?;
//!
//! let report = coordinator
//!     .download_features(&features, Path::new("out"), &mut Quiet)
//!     .await;
//! println!("{}", report.stats.outcome());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod coordinator;
pub mod models;
pub mod selection;
pub mod source;

// Re-export main public API
pub use client::{ClientConfig, GitHubClient, RemoteConfig};
pub use coordinator::{
    Coordinator, DownloadReport, DownloadStats, Reporter, RunEvent, SummaryOutcome,
};
pub use models::{CatalogListing, ContentEntry, EntryType, FeatureReport, FileReport};
pub use selection::{parse_selection, resolve_target_directory};
pub use source::FeatureSource;
