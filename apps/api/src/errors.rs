use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::compiler::CompileFailure;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Compile(#[from] CompileFailure),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Compile(failure) => match failure {
                CompileFailure::CompilationFailed { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "COMPILATION_FAILED",
                    failure.to_string(),
                ),
                CompileFailure::Timeout { .. } => (
                    StatusCode::GATEWAY_TIMEOUT,
                    "COMPILATION_TIMEOUT",
                    failure.to_string(),
                ),
                CompileFailure::ToolchainMissing { .. } => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "TOOLCHAIN_MISSING",
                    failure.to_string(),
                ),
                CompileFailure::UnexpectedError(msg) => {
                    tracing::error!("Compilation error: {msg}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "COMPILATION_ERROR",
                        "PDF compilation hit an unexpected error".to_string(),
                    )
                }
            },
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let mut error = json!({
            "code": code,
            "message": message
        });
        // The compiler log is the only useful diagnostic for a broken document.
        if let AppError::Compile(CompileFailure::CompilationFailed { log }) = &self {
            error["log"] = json!(log);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_compilation_failed_carries_log() {
        let err = AppError::from(CompileFailure::CompilationFailed {
            log: "! Missing $ inserted.".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "COMPILATION_FAILED");
        assert_eq!(body["error"]["log"], "! Missing $ inserted.");
    }

    #[test]
    fn test_compile_failure_status_mapping() {
        let cases = [
            (
                CompileFailure::Timeout {
                    after: Duration::from_secs(30),
                },
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                CompileFailure::ToolchainMissing {
                    program: "pdflatex".into(),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                CompileFailure::UnexpectedError("disk full".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (failure, expected) in cases {
            let response = AppError::from(failure).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[tokio::test]
    async fn test_unexpected_error_message_is_masked() {
        let response =
            AppError::from(CompileFailure::UnexpectedError("/tmp/secret path".into()))
                .into_response();
        let body = body_json(response).await;
        assert!(!body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("/tmp/secret"));
        assert!(body["error"].get("log").is_none());
    }

    #[test]
    fn test_validation_is_bad_request() {
        let response = AppError::Validation("name cannot be empty".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
