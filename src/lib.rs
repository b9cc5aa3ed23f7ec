//! Feature Fetcher Library
//!
//! Lists the feature bundles published in a GitHub repository and downloads
//! the files of the ones a user picks into a local directory.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
