//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use humboldt_core::assistant::AssistantReply;
use humboldt_types::error::RemoteServiceError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The knowledge-base call failed.
    Remote(RemoteServiceError),
    /// Validation error.
    Validation(String),
}

impl From<RemoteServiceError> for AppError {
    fn from(e: RemoteServiceError) -> Self {
        AppError::Remote(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Remote(e) => (
                StatusCode::BAD_GATEWAY,
                "REMOTE_SERVICE_ERROR",
                AssistantReply::from_error(e, None).answer_text,
            ),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = json!({
            "data": null,
            "meta": {
                "request_id": uuid::Uuid::now_v7().to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_errors_are_bad_gateway() {
        let (status, code, message) = AppError::from(RemoteServiceError::Throttled).parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "REMOTE_SERVICE_ERROR");
        assert!(message.contains("throttled"));
    }

    #[test]
    fn test_validation_is_bad_request() {
        let (status, code, _) = AppError::Validation("prompt must not be empty".into()).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
    }
}
