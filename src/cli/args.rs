//! Command-line argument parsing for Feature Fetcher
//!
//! The program is interactive: feature selection and the target directory are
//! always asked for on standard input. Flags only tune logging and where the
//! configuration is read from.

use std::path::PathBuf;

use clap::{Args, Parser};

/// Feature Fetcher - apply boilerplate features from a GitHub repository
#[derive(Parser, Debug)]
#[command(
    name = "feature_fetcher",
    version,
    about = "Interactively download feature bundles from a GitHub features repository",
    long_about = "Lists the features published in a GitHub repository, asks which ones to apply
and where to put them, then downloads every file of the chosen features.

Set GITHUB_API_TOKEN (environment or .env file) to authenticate requests."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long)]
    pub very_verbose: bool,

    /// Quiet mode - only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Logging level requested on the command line, if any
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}
