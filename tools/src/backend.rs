//! Backend HTTP client
//!
//! Every tool makes exactly one request through [`BackendClient`] and folds
//! the answer into its output with an [`Outcome`]:
//! - status 200: a fixed confirmation, or the response body verbatim
//! - any other status: the tool's fixed failure message, returned as `Ok`
//!
//! Only transport failures (connection refused, DNS, unreadable body) come
//! back as `Err(ToolError::Transport)`.

use crate::config::BackendConfig;
use rental_desk_core::agent::{ToolError, ToolResult};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use tracing::{debug, warn};

/// Confirmation returned by upload tools
pub const UPLOADED: &str = "Uploaded successfully";

/// Failure message shared by upload tools
pub const UPLOAD_FAILED: &str =
    "There was an error uploading the information, ask the user to try again later.";

/// What a tool returns when the backend answers 200
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnSuccess {
    /// Fixed confirmation; the response body is not read
    Confirm(&'static str),
    /// Response body, verbatim
    Body,
}

/// How a tool folds the backend's answer into its output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Output for status 200
    pub success: OnSuccess,
    /// Output for any other status
    pub failure: &'static str,
}

impl Outcome {
    /// Outcome shared by the upload tools
    pub const UPLOAD: Self = Self {
        success: OnSuccess::Confirm(UPLOADED),
        failure: UPLOAD_FAILED,
    };

    /// Relay the body on success, `failure` otherwise
    #[must_use]
    pub const fn relay(failure: &'static str) -> Self {
        Self {
            success: OnSuccess::Body,
            failure,
        }
    }
}

/// Client for the rental desk backend
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct BackendClient {
    client: Client,
    endpoint: String,
}

impl BackendClient {
    /// Create a client with a default `reqwest::Client`
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Create a client around an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(client: Client, config: &BackendConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint().to_string(),
        }
    }

    /// Base URL
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Absolute URL for a route
    #[must_use]
    pub fn url(&self, route: &str) -> String {
        format!("{}/{}", self.endpoint, route.trim_start_matches('/'))
    }

    /// `GET {endpoint}/{route}`
    ///
    /// # Errors
    ///
    /// Returns `ToolError::Transport` if the request cannot be sent or the
    /// response body cannot be read.
    pub async fn get(&self, route: &str, outcome: Outcome) -> ToolResult {
        self.send(self.client.get(self.url(route)), outcome).await
    }

    /// `POST {endpoint}/{route}` with a JSON body
    ///
    /// # Errors
    ///
    /// Returns `ToolError::Transport` if the request cannot be sent or the
    /// response body cannot be read.
    pub async fn post_json<B>(&self, route: &str, body: &B, outcome: Outcome) -> ToolResult
    where
        B: Serialize + ?Sized,
    {
        self.send(self.client.post(self.url(route)).json(body), outcome)
            .await
    }

    /// `POST {endpoint}/{route}` with a form-encoded body
    ///
    /// # Errors
    ///
    /// Returns `ToolError::Transport` if the request cannot be sent or the
    /// response body cannot be read.
    pub async fn post_form<B>(&self, route: &str, body: &B, outcome: Outcome) -> ToolResult
    where
        B: Serialize + ?Sized,
    {
        self.send(self.client.post(self.url(route)).form(body), outcome)
            .await
    }

    async fn send(&self, request: RequestBuilder, outcome: Outcome) -> ToolResult {
        let request = request
            .build()
            .map_err(|e| ToolError::Transport(format!("Invalid request: {e}")))?;
        let method = request.method().clone();
        let url = request.url().clone();

        debug!(%method, %url, "Calling backend");

        let response = self.client.execute(request).await.map_err(|e| {
            warn!(%method, %url, error = %e, "Backend unreachable");
            ToolError::Transport(format!("HTTP request failed: {e}"))
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%method, %url, status = status.as_u16(), "Backend rejected request");
            return Ok(outcome.failure.to_string());
        }

        match outcome.success {
            OnSuccess::Confirm(text) => Ok(text.to_string()),
            OnSuccess::Body => response
                .text()
                .await
                .map_err(|e| ToolError::Transport(format!("Failed to read response: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(endpoint: &str) -> BackendClient {
        BackendClient::new(&BackendConfig::new(endpoint).unwrap())
    }

    #[test]
    fn test_url_joins_route() {
        let backend = client("http://localhost:8000/api/");
        assert_eq!(backend.endpoint(), "http://localhost:8000/api");
        assert_eq!(backend.url("get_fleet"), "http://localhost:8000/api/get_fleet");
        assert_eq!(
            backend.url("/call_back/s1"),
            "http://localhost:8000/api/call_back/s1"
        );
    }

    #[test]
    fn test_outcomes() {
        assert_eq!(Outcome::UPLOAD.success, OnSuccess::Confirm("Uploaded successfully"));
        assert_eq!(Outcome::relay("nope").success, OnSuccess::Body);
        assert_eq!(Outcome::relay("nope").failure, "nope");
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let backend = client(&format!("http://{address}"));

        let result = backend.get("get_fleet", Outcome::relay("failed")).await;

        assert!(matches!(result, Err(ToolError::Transport(_))));
    }
}
