use axum::body::Bytes;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::InvalidPayloadPolicy;
use crate::score::{ScorePayload, ScoreResponse, ScoreStore};
use crate::server::error::ApiError;
use crate::server::health::health;

pub const SCORE_PATH: &str = "/api/v1/score";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: ScoreStore,
    pub invalid_payload: InvalidPayloadPolicy,
}

impl AppState {
    pub fn new(store: ScoreStore, invalid_payload: InvalidPayloadPolicy) -> Self {
        Self {
            store,
            invalid_payload,
        }
    }
}

/// Build the router with the score routes, health check, CORS and tracing.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            SCORE_PATH,
            get(get_score).post(post_score).delete(delete_score),
        )
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn get_score(State(state): State<AppState>) -> Json<ScoreResponse> {
    Json(ScoreResponse::from_state(&state.store.get()))
}

async fn post_score(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ScoreResponse>, ApiError> {
    let body = decode_body(&body)?;

    let snapshot = match ScorePayload::parse(&body) {
        Ok(payload) => state.store.set(payload.score),
        Err(err) => match state.invalid_payload {
            InvalidPayloadPolicy::Reject => return Err(err.into()),
            InvalidPayloadPolicy::Ignore => {
                tracing::debug!(reason = %err, "Ignoring score update");
                state.store.get()
            }
        },
    };

    Ok(Json(ScoreResponse::from_state(&snapshot)))
}

async fn delete_score(State(state): State<AppState>) -> Json<ScoreResponse> {
    Json(ScoreResponse::from_state(&state.store.reset_current()))
}

/// An empty body reads as `{}` so a bare POST is a no-op, not an error.
fn decode_body(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }

    serde_json::from_slice(body).map_err(|e| ApiError::MalformedBody(e.to_string()))
}
