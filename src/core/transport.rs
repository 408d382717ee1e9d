//! HTTP transport layer for the telemetry client.
//!
//! This module abstracts the network primitive behind an injectable
//! interface so that fallback behavior and error handling can be tested
//! without a live backend.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use crate::models::ApiConfig;

/// Errors that can occur at the transport level
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
}

/// Raw response returned by a transport
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl TransportResponse {
    /// Whether the status code is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request-in, response-or-error-out interface to the remote service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET request for the given path, including any query string
    async fn get(&self, path: &str) -> Result<TransportResponse, TransportError>;

    /// Issue a POST request with a JSON body
    async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<TransportResponse, TransportError>;
}

/// Transport implementation backed by reqwest
pub struct ReqwestTransport {
    /// HTTP client
    client: Client,
    /// Base URL of the remote service, without a trailing slash
    base_url: String,
}

impl ReqwestTransport {
    /// Create a new transport for the configured API endpoint
    ///
    /// Every request carries a bounded timeout so a hung backend cannot
    /// block a caller indefinitely.
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, path: &str) -> Result<TransportResponse, TransportError> {
        let response = self.client
            .get(self.url(path))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        Ok(TransportResponse { status, body })
    }

    async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<TransportResponse, TransportError> {
        let response = self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        Ok(TransportResponse { status, body })
    }
}
