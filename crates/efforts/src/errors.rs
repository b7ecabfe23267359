use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::streams::StreamKind;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Malformed {stream} stream at sample {index}: {value:?}")]
    MalformedStream {
        stream: StreamKind,
        index: usize,
        value: String,
    },

    #[error("Stream length mismatch: {time_len} time samples, {distance_len} distance samples")]
    StreamLengthMismatch { time_len: usize, distance_len: usize },

    #[error("{stream} stream is not monotonic at sample {index}")]
    NonMonotonicStream { stream: StreamKind, index: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

impl AppError {
    /// Errors caused by the content of an activity's streams rather than the
    /// infrastructure around them.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            AppError::MalformedStream { .. }
                | AppError::StreamLengthMismatch { .. }
                | AppError::NonMonotonicStream { .. }
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Database(e) => {
                error!("Database error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Migration(e) => {
                error!("Migration error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Task(e) => {
                error!("Background task failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Config(msg) => {
                error!("Configuration error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::MalformedStream { .. }
            | AppError::StreamLengthMismatch { .. }
            | AppError::NonMonotonicStream { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_errors_map_to_unprocessable() {
        let err = AppError::NonMonotonicStream {
            stream: StreamKind::Distance,
            index: 4,
        };
        assert!(err.is_data_error());
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_not_found_status() {
        assert!(!AppError::NotFound.is_data_error());
        assert_eq!(AppError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_malformed_message() {
        let err = AppError::MalformedStream {
            stream: StreamKind::Time,
            index: 2,
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed time stream at sample 2: \"abc\"");
    }
}
