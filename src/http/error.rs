//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// API error response body.
///
/// Every user-visible failure is this shape; internal error detail stays in
/// the server logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error description
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found ("<Resource> not found")
    NotFound(String),
    /// Invalid request, e.g. a non-numeric id
    BadRequest(String),
    /// Internal server error; message is the generic client-facing text,
    /// never the underlying repository error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::new(msg)),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg)),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(msg)),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn errors_render_as_json_error_bodies() {
        let response = AppError::NotFound("Aircraft not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Aircraft not found"}));
    }

    #[tokio::test]
    async fn internal_errors_map_to_500() {
        let response = AppError::Internal("Failed to fetch aircraft".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
