use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use crate::models::StatusPayload;

#[derive(Debug, Error)]
pub enum StatusClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid status payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Reads the trading bot's status endpoint.
#[derive(Debug, Clone)]
pub struct StatusClient {
    http: Client,
    url: String,
}

impl StatusClient {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Client with a per-request timeout.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, StatusClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::new(http, url))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and decode the current status payload.
    pub async fn fetch(&self) -> Result<StatusPayload, StatusClientError> {
        let body = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let payload: StatusPayload = serde_json::from_slice(&body)?;
        Ok(payload)
    }
}
