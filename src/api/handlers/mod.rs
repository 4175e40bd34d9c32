//! API handlers

pub mod health;
pub mod quote;
pub mod tasks;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::TodoError;

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let status = match &self {
            TodoError::NotFound(_) => StatusCode::NOT_FOUND,
            TodoError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}
