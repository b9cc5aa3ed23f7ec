//! HTTP client configuration and remote endpoint layout
//!
//! `ClientConfig` controls how the reqwest client is built, `RemoteConfig`
//! describes which repository, branch and directory the catalog is read from
//! and knows how to turn feature paths into listing and raw-content URLs.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::constants::{github, http};
use crate::errors::{RemoteError, RemoteResult};

/// Configuration for the underlying HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent sent with every request
    pub user_agent: String,
    /// Whole-request timeout (None = wait indefinitely)
    pub request_timeout: Option<Duration>,
    /// Connect timeout (None = wait indefinitely)
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: http::USER_AGENT.to_string(),
            request_timeout: None,
            connect_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Builds the HTTP client with the specified configuration
    pub fn build_http_client(&self) -> RemoteResult<Client> {
        let mut client_builder = Client::builder().user_agent(self.user_agent.as_str());

        if let Some(timeout) = self.request_timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(timeout) = self.connect_timeout {
            client_builder = client_builder.connect_timeout(timeout);
        }

        client_builder.build().map_err(RemoteError::Http)
    }
}

/// Location of the features catalog on the remote host
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch (or any git ref) to read from
    pub branch: String,
    /// Directory holding one subdirectory per feature
    pub features_dir: String,
    /// Base of the "list directory contents" API
    pub api_base_url: Url,
    /// Base of the raw file host
    pub raw_base_url: Url,
    /// Optional bearer token
    pub token: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        let (owner, repo) = github::DEFAULT_REPO
            .split_once('/')
            .unwrap_or((github::DEFAULT_REPO, ""));

        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: github::DEFAULT_BRANCH.to_string(),
            features_dir: github::DEFAULT_FEATURES_DIR.to_string(),
            api_base_url: Url::parse(github::API_BASE_URL).expect("API base URL should be valid"),
            raw_base_url: Url::parse(github::RAW_BASE_URL).expect("Raw base URL should be valid"),
            token: None,
        }
    }
}

impl RemoteConfig {
    /// Set the bearer token; blank tokens count as no token
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }

    /// `owner/repo` slug
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Listing URL for `path` below the features directory (empty = the catalog itself)
    pub fn contents_url(&self, path: &str) -> RemoteResult<Url> {
        let segments = ["repos", self.owner.as_str(), self.repo.as_str(), "contents"]
            .into_iter()
            .chain(split_path(&self.features_dir))
            .chain(split_path(path));

        let mut url = append_segments(&self.api_base_url, segments)?;
        url.query_pairs_mut().append_pair("ref", &self.branch);
        Ok(url)
    }

    /// Raw download URL of `file` (relative path) inside `feature`
    pub fn raw_file_url(&self, feature: &str, file: &str) -> RemoteResult<Url> {
        let segments = [self.owner.as_str(), self.repo.as_str()]
            .into_iter()
            .chain(split_path(&self.branch))
            .chain(split_path(&self.features_dir))
            .chain(split_path(feature))
            .chain(split_path(file));

        append_segments(&self.raw_base_url, segments)
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Appends percent-encoded path segments to `base`
fn append_segments<'a>(base: &Url, segments: impl IntoIterator<Item = &'a str>) -> RemoteResult<Url> {
    let mut url = base.clone();
    {
        let mut path = url.path_segments_mut().map_err(|_| RemoteError::InvalidUrl {
            url: base.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        })?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}
