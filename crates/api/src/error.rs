//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Whatever the failure, the client
//! receives the same body shape:
//!
//! ```json
//! { "message": "No category found with this id!" }
//! ```
//!
//! Server faults are captured to Sentry and logged; their details never reach
//! the client.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::RepositoryError;

/// Message returned when a category lookup or delete matches no row.
pub const CATEGORY_NOT_FOUND: &str = "No category found with this id!";

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store failure on a read path or delete.
    #[error("Database error: {0}")]
    Database(#[source] RepositoryError),

    /// Store refused a write requested by the client.
    #[error("{0}")]
    Rejected(RepositoryError),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// The fixed not-found error for category lookups.
    #[must_use]
    pub fn category_not_found() -> Self {
        Self::NotFound(CATEGORY_NOT_FOUND.to_string())
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        Self::Database(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::category_not_found();
        assert_eq!(err.to_string(), CATEGORY_NOT_FOUND);

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");

        let err = AppError::Rejected(RepositoryError::Constraint("null value".to_string()));
        assert_eq!(err.to_string(), "invalid data: null value");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(AppError::category_not_found().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::BadRequest("test".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Rejected(RepositoryError::Constraint("fk".to_string())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database(RepositoryError::Database(sqlx::Error::PoolTimedOut)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = body_of(AppError::category_not_found()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "No category found with this id!");
    }

    #[tokio::test]
    async fn test_server_error_hides_details() {
        let err = AppError::Database(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Internal server error");
    }

    #[tokio::test]
    async fn test_rejected_write_exposes_reason() {
        let err = AppError::Rejected(RepositoryError::Constraint(
            "null value in column \"category_name\"".to_string(),
        ));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "invalid data: null value in column \"category_name\"");
    }
}
