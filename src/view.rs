//! Presentation state for the score commands.
//!
//! Holds what the user sees and turns user intents into client calls. The
//! "+1" of the add intent is computed here, never by the client or the store.

use crate::client::{ClientError, Source, SyncOutcome};
use crate::score::{ScorePayload, ScoreState};

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again.";
pub const RESET_ERROR: &str = "Failed to reset score.";

#[derive(Debug, Clone, Default)]
pub struct ScoreView {
    pub state: ScoreState,
    pub error: Option<String>,
    pub source: Option<Source>,
}

impl ScoreView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload for the "add point" intent.
    pub fn next_score(&self) -> ScorePayload {
        ScorePayload {
            score: self.state.current.saturating_add(1),
        }
    }

    /// Reset is pointless while the current score is already zero.
    pub fn can_reset(&self) -> bool {
        self.state.current != 0
    }

    /// A failed read leaves the displayed state untouched and records the
    /// error, so follow-up intents must not be derived from it.
    pub fn apply_initial(&mut self, result: Result<SyncOutcome, ClientError>) {
        self.error = None;
        match result {
            Ok(outcome) => self.apply_full(outcome),
            Err(err) => self.fail(err, UNEXPECTED_ERROR),
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn apply_submit(&mut self, result: Result<SyncOutcome, ClientError>) {
        self.error = None;
        match result {
            Ok(outcome) if outcome.response.success => self.apply_full(outcome),
            Ok(outcome) => {
                self.source = Some(outcome.source);
                self.error = Some(
                    outcome
                        .response
                        .message
                        .unwrap_or_else(|| "Failed to update score".to_string()),
                );
            }
            Err(err) => self.fail(err, UNEXPECTED_ERROR),
        }
    }

    /// Only `current` follows the response; `high` stays as displayed.
    pub fn apply_reset(&mut self, result: Result<SyncOutcome, ClientError>) {
        match result {
            Ok(outcome) => {
                self.source = Some(outcome.source);
                if outcome.response.success {
                    self.state.current = outcome.response.current_score;
                }
            }
            Err(err) => self.fail(err, RESET_ERROR),
        }
    }

    fn apply_full(&mut self, outcome: SyncOutcome) {
        self.source = Some(outcome.source);
        self.state = outcome.response.state();
    }

    fn fail(&mut self, err: ClientError, message: &str) {
        tracing::error!(error = %err, "Score operation failed");
        self.error = Some(message.to_string());
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "Current Score: {}\nHigh Score:    {}",
            self.state.current, self.state.high
        );
        if self.source == Some(Source::Local) {
            out.push_str("\n(offline: using local data)");
        }
        if let Some(error) = &self.error {
            out.push_str("\nError: ");
            out.push_str(error);
        }
        out
    }
}
