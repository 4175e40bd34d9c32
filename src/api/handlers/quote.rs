//! Motivational quote handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quote: String,
}

/// GET /quote
///
/// Latest quote fetched after a completion, or the fallback message when
/// none is available. Never fails.
pub async fn get_quote(State(state): State<AppState>) -> Json<QuoteResponse> {
    Json(QuoteResponse {
        quote: state.tasks.notifier().latest_message(),
    })
}
