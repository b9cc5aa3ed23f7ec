//! Core HTTP operations
//!
//! Every request goes through `HttpHandler::get_response`, which attaches the
//! bearer token when one is configured and turns non-success statuses into
//! `RemoteError::Status`. Requests are issued one at a time and never retried.

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::errors::{RemoteError, RemoteResult};

/// HTTP operations handler
#[derive(Debug)]
pub struct HttpHandler {
    client: Client,
    token: Option<String>,
}

impl HttpHandler {
    /// Creates a new HttpHandler with the given client and optional bearer token
    pub fn new(client: Client, token: Option<String>) -> Self {
        Self { client, token }
    }

    /// Whether requests are authenticated
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Issues a GET and returns the response if its status is a success
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Http` on network faults and `RemoteError::Status`
    /// when the server answers with a non-success status.
    pub async fn get_response(&self, url: &Url, accept: Option<&str>) -> RemoteResult<reqwest::Response> {
        let mut request = self.client.get(url.as_str());

        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!("GET {}", url);
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("GET {} failed with HTTP {}", url, status.as_u16());
            return Err(RemoteError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// Fetches and decodes a JSON document
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url, accept: &str) -> RemoteResult<T> {
        let response = self.get_response(url, Some(accept)).await?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|source| RemoteError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Fetches the full response body
    pub async fn get_bytes(&self, url: &Url) -> RemoteResult<Vec<u8>> {
        let response = self.get_response(url, None).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}
