//! Command-line interface components
//!
//! This module contains CLI-specific code for Feature Fetcher: argument
//! parsing, prompts, console rendering and the interactive run itself.

pub mod args;
pub mod commands;
pub mod prompt;
pub mod report;

pub use args::{Cli, GlobalArgs};
pub use commands::{run_interactive, RunOutcome};
pub use prompt::ask;
pub use report::ConsoleReporter;
