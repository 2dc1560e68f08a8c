use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::state::ScoreState;

/// Request body for a score update: the new absolute value of `current`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePayload {
    pub score: i64,
}

/// Reasons a request body does not yield a [`ScorePayload`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    #[error("Missing 'score' field")]
    MissingScore,

    #[error("'score' must be a number, got {found}")]
    NotANumber { found: &'static str },

    #[error("'score' must be a whole number, got {value}")]
    NotAnInteger { value: f64 },

    #[error("'score' is out of range")]
    OutOfRange,
}

impl ScorePayload {
    /// Parse an already-decoded JSON body.
    ///
    /// Integral floats such as `3.0` are accepted; anything that is not a JSON
    /// number is rejected.
    pub fn parse(body: &Value) -> Result<Self, PayloadError> {
        let score = body.get("score").ok_or(PayloadError::MissingScore)?;

        let number = match score {
            Value::Number(number) => number,
            other => {
                return Err(PayloadError::NotANumber {
                    found: json_type_name(other),
                })
            }
        };

        if let Some(score) = number.as_i64() {
            return Ok(Self { score });
        }

        let value = number.as_f64().ok_or(PayloadError::OutOfRange)?;
        if value.fract() != 0.0 {
            return Err(PayloadError::NotAnInteger { value });
        }
        if value < i64::MIN as f64 || value >= i64::MAX as f64 {
            return Err(PayloadError::OutOfRange);
        }

        Ok(Self {
            score: value as i64,
        })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Response shape returned by every score operation, local or remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub success: bool,
    pub current_score: i64,
    pub high_score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ScoreResponse {
    pub fn from_state(state: &ScoreState) -> Self {
        Self {
            success: true,
            current_score: state.current,
            high_score: state.high,
            message: None,
        }
    }

    pub fn state(&self) -> ScoreState {
        ScoreState {
            current: self.current_score,
            high: self.high_score,
        }
    }
}
