use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Current and high score pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub current: i64,
    pub high: i64,
}

impl ScoreState {
    /// Replace `current` and raise `high` if the new value exceeds it.
    pub fn with_current(self, score: i64) -> Self {
        Self {
            current: score,
            high: self.high.max(score),
        }
    }

    /// Zero `current`, keep `high`.
    pub fn reset(self) -> Self {
        Self {
            current: 0,
            high: self.high,
        }
    }
}

/// Thread-safe score holder owned by the server process.
///
/// Cloning yields another handle to the same state. Each operation takes the
/// lock once, so a `set` is atomic on its own but concurrent writers are not
/// ordered: the last one to acquire the lock decides `current`.
#[derive(Clone, Default)]
pub struct ScoreStore {
    inner: Arc<RwLock<ScoreState>>,
}

impl ScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> ScoreState {
        *self.inner.read()
    }

    /// Set `current` to `score` verbatim. Never additive.
    pub fn set(&self, score: i64) -> ScoreState {
        let mut state = self.inner.write();
        *state = state.with_current(score);

        tracing::debug!(current = state.current, high = state.high, "Score set");
        *state
    }

    /// Zero `current`; `high` is untouched.
    pub fn reset_current(&self) -> ScoreState {
        let mut state = self.inner.write();
        *state = state.reset();

        tracing::debug!(high = state.high, "Current score reset");
        *state
    }
}
