//! Remote score authority.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use thiserror::Error;

use crate::config::ClientConfig;
use crate::score::{ScorePayload, ScoreResponse};
use crate::server::router::SCORE_PATH;

/// Failures talking to the remote authority.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Connection refused, DNS failure, timeout and the like.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Server answered with a non-success status.
    #[error("Server returned {status}")]
    Status { status: u16 },

    /// Success status, but the body is not a score response.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// The three score operations a remote authority exposes.
#[async_trait]
pub trait ScoreRemote: Send + Sync {
    async fn fetch(&self) -> Result<ScoreResponse, RemoteError>;

    async fn submit(&self, payload: ScorePayload) -> Result<ScoreResponse, RemoteError>;

    async fn reset(&self) -> Result<ScoreResponse, RemoteError>;
}

/// [`ScoreRemote`] over HTTP.
pub struct HttpRemote {
    client: Client,
    endpoint: String,
}

impl HttpRemote {
    pub fn new(config: &ClientConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let endpoint = format!("{}{}", config.base_url.trim_end_matches('/'), SCORE_PATH);

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call(
        &self,
        method: Method,
        payload: Option<ScorePayload>,
    ) -> Result<ScoreResponse, RemoteError> {
        let mut builder = self.client.request(method.clone(), self.endpoint.as_str());
        if let Some(payload) = payload {
            builder = builder.json(&payload);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let parsed = serde_json::from_slice::<ScoreResponse>(&body)
            .map_err(|e| RemoteError::Malformed(e.to_string()))?;

        tracing::debug!(
            method = %method,
            current = parsed.current_score,
            high = parsed.high_score,
            "Remote score response"
        );
        Ok(parsed)
    }
}

#[async_trait]
impl ScoreRemote for HttpRemote {
    async fn fetch(&self) -> Result<ScoreResponse, RemoteError> {
        self.call(Method::GET, None).await
    }

    async fn submit(&self, payload: ScorePayload) -> Result<ScoreResponse, RemoteError> {
        self.call(Method::POST, Some(payload)).await
    }

    async fn reset(&self) -> Result<ScoreResponse, RemoteError> {
        self.call(Method::DELETE, None).await
    }
}
