//! Score state and its wire representation.
//!
//! Provides the authoritative in-memory store used by the server and the
//! request/response types shared by server and client.

mod state;
mod types;

pub use state::{ScoreState, ScoreStore};
pub use types::{PayloadError, ScorePayload, ScoreResponse};
