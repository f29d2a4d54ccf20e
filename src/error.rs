//! Error types for Equipos server

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Application error codes carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    DbFailure = 3,
    Duplicate = 8,
    BadValue = 18,
    NoSuchData = 20,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Classify a failed insert into validation, conflict or infrastructure.
    ///
    /// The driver message stays in the log; the client only sees a fixed text.
    pub fn from_write_error(err: sqlx::Error) -> Self {
        let kind = match &err {
            sqlx::Error::Database(db) => Some(db.kind()),
            _ => None,
        };

        match kind {
            Some(ErrorKind::ForeignKeyViolation) => {
                tracing::warn!("Rejected write, missing reference: {}", err);
                AppError::Validation(
                    "Referenced equipment type, brand or status does not exist".to_string(),
                )
            }
            Some(ErrorKind::NotNullViolation) | Some(ErrorKind::CheckViolation) => {
                tracing::warn!("Rejected write, invalid value: {}", err);
                AppError::Validation("Equipment payload has missing or invalid fields".to_string())
            }
            Some(ErrorKind::UniqueViolation) => {
                tracing::warn!("Rejected write, duplicate: {}", err);
                AppError::Conflict("Equipment already exists".to_string())
            }
            _ => AppError::Database(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone()),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error as StdError, fmt};

    use sqlx::error::DatabaseError;

    const DRIVER_MESSAGE: &str = "violates constraint \"equipos_marca_id_fkey\" on table equipos";

    #[derive(Debug)]
    struct FakeDbError(ErrorKind);

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(DRIVER_MESSAGE)
        }
    }

    impl StdError for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            DRIVER_MESSAGE
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.0 {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
                ErrorKind::NotNullViolation => ErrorKind::NotNullViolation,
                ErrorKind::CheckViolation => ErrorKind::CheckViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn db_error(kind: ErrorKind) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError(kind)))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let response = AppError::NotFound("Equipment 7 not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["code"], 20);
        assert_eq!(body["error"], "NoSuchData");
        assert_eq!(body["message"], "Equipment 7 not found");
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "DbFailure");
        assert_eq!(body["message"], "Database error");
    }

    #[tokio::test]
    async fn test_validation_and_conflict_status() {
        let validation = AppError::Validation("bad".to_string()).into_response();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let conflict = AppError::Conflict("dup".to_string()).into_response();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_write_error_foreign_key_is_validation() {
        let err = AppError::from_write_error(db_error(ErrorKind::ForeignKeyViolation));
        assert!(matches!(err, AppError::Validation(_)));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "BadValue");
        assert!(!body.to_string().contains("equipos_marca_id_fkey"));
    }

    #[test]
    fn test_write_error_not_null_and_check_are_validation() {
        for kind in [ErrorKind::NotNullViolation, ErrorKind::CheckViolation] {
            let err = AppError::from_write_error(db_error(kind));
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_write_error_unique_is_conflict() {
        let err = AppError::from_write_error(db_error(ErrorKind::UniqueViolation));
        assert!(matches!(err, AppError::Conflict(_)));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Duplicate");
        assert!(!body.to_string().contains(DRIVER_MESSAGE));
    }

    #[tokio::test]
    async fn test_write_error_other_kind_is_infrastructure() {
        let err = AppError::from_write_error(db_error(ErrorKind::Other));
        assert!(matches!(err, AppError::Database(_)));

        let body = body_json(err.into_response()).await;
        assert_eq!(body["message"], "Database error");
        assert!(!body.to_string().contains("equipos_marca_id_fkey"));
    }

    #[test]
    fn test_write_error_without_database_kind_is_infrastructure() {
        let err = AppError::from_write_error(sqlx::Error::PoolClosed);
        assert!(matches!(err, AppError::Database(sqlx::Error::PoolClosed)));
    }
}
