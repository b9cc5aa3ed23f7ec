//! Configuration management for Feature Fetcher
//!
//! Settings come from, in increasing precedence: built-in defaults, an
//! optional TOML file, and environment variables (including a `.env` file
//! loaded at startup). The result is converted into the explicit runtime
//! values the client is constructed with.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::app::{ClientConfig, RemoteConfig};
use crate::constants::{env as env_constants, files, github, http};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Which repository the catalog is read from
    pub repository: RepositoryConfigToml,
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Bearer token, only ever taken from the environment
    #[serde(skip)]
    pub token: Option<String>,
}

/// TOML-friendly repository configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfigToml {
    /// `owner/name` slug
    pub repo: String,
    /// Branch or other git ref
    pub branch: String,
    /// Directory holding the features
    pub features_dir: String,
    /// Contents API base URL
    pub api_base_url: String,
    /// Raw file host base URL
    pub raw_base_url: String,
}

impl Default for RepositoryConfigToml {
    fn default() -> Self {
        Self {
            repo: github::DEFAULT_REPO.to_string(),
            branch: github::DEFAULT_BRANCH.to_string(),
            features_dir: github::DEFAULT_FEATURES_DIR.to_string(),
            api_base_url: github::API_BASE_URL.to_string(),
            raw_base_url: github::RAW_BASE_URL.to_string(),
        }
    }
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// User agent header
    pub user_agent: String,
    /// Request timeout in seconds (None = no timeout)
    pub request_timeout_secs: Option<u64>,
    /// Connect timeout in seconds (None = no timeout)
    pub connect_timeout_secs: Option<u64>,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            user_agent: http::USER_AGENT.to_string(),
            request_timeout_secs: None,
            connect_timeout_secs: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when no verbosity flag is given: error, warn, info, debug, trace
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (explicit path, or the first one found)
    /// 3. Environment variables
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) if path.exists() => Some(path),
            Some(path) => return Err(ConfigError::NotFound { path }),
            None => Self::find_config_file(),
        };

        let mut config = match config_path {
            Some(path) => Self::load_from_file(&path).await?,
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(files::LOCAL_CONFIG_FILE)];
        if let Some(path) = Self::user_config_path() {
            search_paths.push(path);
        }

        let found = search_paths.into_iter().find(|path| path.exists());
        match &found {
            Some(path) => debug!("Found config file: {}", path.display()),
            None => debug!("No config file found in standard locations"),
        }
        found
    }

    /// Per-user config file path, if the platform has a config directory
    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(files::CONFIG_DIR_NAME).join(files::CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup(env_constants::GITHUB_TOKEN) {
            self.token = Some(token);
        }
        if let Some(repo) = lookup(env_constants::REPO).filter(|v| !v.trim().is_empty()) {
            debug!("Repository overridden by {}", env_constants::REPO);
            self.repository.repo = repo.trim().to_string();
        }
        if let Some(branch) = lookup(env_constants::BRANCH).filter(|v| !v.trim().is_empty()) {
            debug!("Branch overridden by {}", env_constants::BRANCH);
            self.repository.branch = branch.trim().to_string();
        }
    }

    /// Runtime remote description
    pub fn remote_config(&self) -> ConfigResult<RemoteConfig> {
        self.repository.to_runtime_config(self.token.clone())
    }

    /// Runtime HTTP client settings
    pub fn client_config(&self) -> ClientConfig {
        self.client.to_runtime_config()
    }

    /// Configured log level
    pub fn log_level(&self) -> ConfigResult<tracing::Level> {
        tracing::Level::from_str(self.logging.level.trim()).map_err(|_| {
            ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: "Expected one of error, warn, info, debug, trace".to_string(),
            }
        })
    }
}

impl RepositoryConfigToml {
    /// Convert to runtime RemoteConfig
    pub fn to_runtime_config(&self, token: Option<String>) -> ConfigResult<RemoteConfig> {
        let (owner, repo) = self
            .repo
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty() && !repo.contains('/'))
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "repository.repo".to_string(),
                value: self.repo.clone(),
                reason: "Expected an owner/name slug".to_string(),
            })?;

        if self.branch.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "repository.branch".to_string(),
                value: self.branch.clone(),
                reason: "Branch cannot be empty".to_string(),
            });
        }

        let remote = RemoteConfig {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: self.branch.trim().to_string(),
            features_dir: self.features_dir.trim_matches('/').to_string(),
            api_base_url: parse_base_url("repository.api_base_url", &self.api_base_url)?,
            raw_base_url: parse_base_url("repository.raw_base_url", &self.raw_base_url)?,
            token: None,
        };

        Ok(remote.with_token(token))
    }
}

impl ClientConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            user_agent: self.user_agent.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
        }
    }
}

fn parse_base_url(field: &str, value: &str) -> ConfigResult<Url> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }

    Ok(url)
}
