//! Application constants for Feature Fetcher
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

/// Environment variable names
pub mod env {
    /// Bearer token for the GitHub API (optional)
    pub const GITHUB_TOKEN: &str = "GITHUB_API_TOKEN";

    /// Overrides the `owner/name` repository slug
    pub const REPO: &str = "FEATURE_FETCHER_REPO";

    /// Overrides the branch features are read from
    pub const BRANCH: &str = "FEATURE_FETCHER_BRANCH";
}

/// Features repository defaults
pub mod github {
    /// Repository holding the features directory
    pub const DEFAULT_REPO: &str = "python-boilerplate/features-database";

    /// Branch the catalog is read from
    pub const DEFAULT_BRANCH: &str = "main";

    /// Directory inside the repository that holds one subdirectory per feature
    pub const DEFAULT_FEATURES_DIR: &str = "features";

    /// REST API base URL
    pub const API_BASE_URL: &str = "https://api.github.com";

    /// Raw content base URL
    pub const RAW_BASE_URL: &str = "https://raw.githubusercontent.com";

    /// Media type requested from the contents endpoint
    pub const ACCEPT_JSON: &str = "application/vnd.github+json";

    /// Contents entry type for regular files
    pub const ENTRY_FILE: &str = "file";

    /// Contents entry type for directories
    pub const ENTRY_DIR: &str = "dir";
}

/// HTTP client configuration constants
pub mod http {
    /// Default user agent; the GitHub API rejects requests without one
    pub const USER_AGENT: &str = concat!("Feature-Fetcher/", env!("CARGO_PKG_VERSION"));
}

/// Configuration file locations
pub mod files {
    /// Project-local configuration file
    pub const LOCAL_CONFIG_FILE: &str = "feature-fetcher.toml";

    /// Directory under the user config dir
    pub const CONFIG_DIR_NAME: &str = "feature-fetcher";

    /// File name inside `CONFIG_DIR_NAME`
    pub const CONFIG_FILE_NAME: &str = "config.toml";
}

/// Console output
pub mod ui {
    /// Width of the rule printed above the summary
    pub const SEPARATOR_WIDTH: usize = 50;

    /// Keyword selecting every feature
    pub const SELECT_ALL: &str = "all";

    /// Directory used when the target prompt is left empty
    pub const DEFAULT_TARGET_DIR: &str = ".";
}

/// Process exit codes
pub mod exit {
    /// Fatal error
    pub const FAILURE: i32 = 1;

    /// Interrupted by Ctrl-C / SIGTERM
    pub const INTERRUPTED: i32 = 130;
}
