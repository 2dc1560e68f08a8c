//! Score client with transparent local fallback.
//!
//! Every operation tries the remote authority once. If the server cannot be
//! reached or answers with an error status, the operation is replayed against
//! a local [`KeyValueStore`] and a response of the same shape is synthesized.
//! The caller always gets a [`ScoreResponse`]; [`SyncOutcome::source`] tells
//! which path produced it.
//!
//! There is no reconciliation: once the server is reachable again its state
//! wins and the local copy is simply no longer consulted.

mod remote;
mod storage;

pub use remote::{HttpRemote, RemoteError, ScoreRemote};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

use thiserror::Error;

use crate::score::{ScorePayload, ScoreResponse, ScoreState};

pub const CURRENT_SCORE_KEY: &str = "app_current_score";
pub const HIGH_SCORE_KEY: &str = "app_high_score";

/// Which side produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Remote,
    Local,
}

/// Response plus the path it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub source: Source,
    pub response: ScoreResponse,
}

impl SyncOutcome {
    fn remote(response: ScoreResponse) -> Self {
        Self {
            source: Source::Remote,
            response,
        }
    }

    fn local(state: ScoreState) -> Self {
        Self {
            source: Source::Local,
            response: ScoreResponse::from_state(&state),
        }
    }

    pub fn is_local(&self) -> bool {
        self.source == Source::Local
    }

    pub fn into_response(self) -> ScoreResponse {
        self.response
    }
}

/// Failures that are not absorbed by the fallback path.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Malformed server response: {0}")]
    MalformedResponse(String),

    #[error("Local fallback failed: {0}")]
    Storage(#[from] StorageError),
}

pub struct ScoreClient<R, S> {
    remote: R,
    local: S,
}

impl<R: ScoreRemote, S: KeyValueStore> ScoreClient<R, S> {
    pub fn new(remote: R, local: S) -> Self {
        Self { remote, local }
    }

    pub fn local_store(&self) -> &S {
        &self.local
    }

    /// Read the score, from the server if possible.
    pub async fn fetch_initial(&self) -> Result<SyncOutcome, ClientError> {
        match self.remote.fetch().await {
            Ok(response) => Ok(SyncOutcome::remote(response)),
            Err(err) => {
                let err = absorb(err)?;
                tracing::warn!(error = %err, "API unavailable, loading local state");
                Ok(SyncOutcome::local(self.read_local()?))
            }
        }
    }

    /// Set the current score to `payload.score`.
    pub async fn submit_score(&self, payload: ScorePayload) -> Result<SyncOutcome, ClientError> {
        match self.remote.submit(payload).await {
            Ok(response) => Ok(SyncOutcome::remote(response)),
            Err(err) => {
                let err = absorb(err)?;
                tracing::warn!(error = %err, "API unavailable, switching to local mode");

                let state = self.read_local()?.with_current(payload.score);
                // High first: a failed second write must not leave high < current.
                self.local.set(HIGH_SCORE_KEY, &state.high.to_string())?;
                self.local.set(CURRENT_SCORE_KEY, &state.current.to_string())?;
                Ok(SyncOutcome::local(state))
            }
        }
    }

    /// Zero the current score, keeping the high score.
    pub async fn reset_current(&self) -> Result<SyncOutcome, ClientError> {
        match self.remote.reset().await {
            Ok(response) => Ok(SyncOutcome::remote(response)),
            Err(err) => {
                let err = absorb(err)?;
                tracing::warn!(error = %err, "API unavailable, resetting locally");

                self.local.set(CURRENT_SCORE_KEY, "0")?;
                let high = self.read_key(HIGH_SCORE_KEY)?;
                Ok(SyncOutcome::local(ScoreState { current: 0, high }))
            }
        }
    }

    fn read_local(&self) -> Result<ScoreState, StorageError> {
        Ok(ScoreState {
            current: self.read_key(CURRENT_SCORE_KEY)?,
            high: self.read_key(HIGH_SCORE_KEY)?,
        })
    }

    /// Missing or unparsable entries read as zero.
    fn read_key(&self, key: &str) -> Result<i64, StorageError> {
        let Some(raw) = self.local.get(key)? else {
            return Ok(0);
        };

        match raw.trim().parse::<i64>() {
            Ok(value) => Ok(value),
            Err(_) => {
                tracing::warn!(key, value = %raw, "Unparsable local score, using 0");
                Ok(0)
            }
        }
    }
}

/// Transport and status failures switch to local mode; anything else surfaces.
fn absorb(err: RemoteError) -> Result<RemoteError, ClientError> {
    match err {
        RemoteError::Malformed(msg) => Err(ClientError::MalformedResponse(msg)),
        other => Ok(other),
    }
}
