//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::intake::IntakeError;
use crate::session::SessionError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error("Session not ready: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NoFile | SessionError::NotReady(_) => ApiError::Conflict(err.to_string()),
            SessionError::LockPoisoned => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Intake(intake) => {
                let (status, code) = match intake {
                    IntakeError::FileTooLarge { .. } => {
                        (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE")
                    }
                    IntakeError::UnsupportedFormat(_) => {
                        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_FORMAT")
                    }
                    IntakeError::MultipleFiles => (StatusCode::BAD_REQUEST, "MULTIPLE_FILES"),
                    IntakeError::NoFile => (StatusCode::BAD_REQUEST, "NO_FILE"),
                    IntakeError::Malformed(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
                };
                (status, code, intake.to_string())
            }
            ApiError::Conflict(detail) => (StatusCode::CONFLICT, "NOT_READY", detail.clone()),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    use crate::session::Phase;

    #[tokio::test]
    async fn oversize_returns_413() {
        let response = ApiError::from(IntakeError::FileTooLarge {
            size_mb: 61.2,
            max_mb: 50,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "FILE_TOO_LARGE");
        assert!(json["error"]["message"].as_str().unwrap().contains("50MB"));
    }

    #[tokio::test]
    async fn unsupported_format_returns_415() {
        let response =
            ApiError::from(IntakeError::UnsupportedFormat("application/zip".into())).into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn multiple_files_returns_400() {
        let response = ApiError::from(IntakeError::MultipleFiles).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "MULTIPLE_FILES");
    }

    #[tokio::test]
    async fn session_not_ready_returns_409() {
        let response = ApiError::from(SessionError::NotReady(Phase::Analyzing)).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "NOT_READY");
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let response = ApiError::Internal("lock poisoned".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }
}
