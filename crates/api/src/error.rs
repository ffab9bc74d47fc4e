//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`.
//!
//! # Status policy
//!
//! | error | status | body |
//! |---|---|---|
//! | validation failure | 400 | `{"error": [field errors]}` |
//! | malformed request | 400 | `{"error": message}` |
//! | duplicate unique field | 409 | `{"error": message}` |
//! | empty lookup/delete result | 404 | `{"error": message}` |
//! | store or internal failure | 500 | `{"error": "Error interno del servidor"}` |
//!
//! Internal error details are logged and captured, never sent to clients.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use botica_core::schema::ValidationErrors;

use crate::db::RepositoryError;
use crate::services::accounts::AccountError;

/// Client-facing message for any server-side failure.
const INTERNAL_MESSAGE: &str = "Error interno del servidor";

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Account operation failed.
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    /// Request payload failed schema validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Database(e) => repository_status(e),
            Self::Account(AccountError::Duplicate(_)) => StatusCode::CONFLICT,
            Self::Account(AccountError::Repository(e)) => repository_status(e),
            Self::Account(AccountError::PasswordHash) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// The message sent to the client for non-validation errors.
    fn client_message(&self) -> String {
        match self {
            Self::Database(RepositoryError::Conflict(message))
            | Self::Account(
                AccountError::Duplicate(message)
                | AccountError::Repository(RepositoryError::Conflict(message)),
            ) => message.clone(),
            Self::Database(RepositoryError::NotFound)
            | Self::Account(AccountError::Repository(RepositoryError::NotFound)) => {
                "No encontrado".to_string()
            }
            Self::NotFound(message) | Self::BadRequest(message) => message.clone(),
            Self::Validation(errors) => errors.to_string(),
            // Don't expose internal error details to clients
            Self::Database(_) | Self::Account(_) | Self::Internal(_) => {
                INTERNAL_MESSAGE.to_string()
            }
        }
    }
}

fn repository_status(e: &RepositoryError) -> StatusCode {
    match e {
        RepositoryError::Conflict(_) => StatusCode::CONFLICT,
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = match &self {
            Self::Validation(errors) => json!({ "error": errors }),
            other => json!({ "error": other.client_message() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use botica_core::schema::FieldError;
    use serde_json::Value;

    fn status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    async fn body_json(err: AppError) -> Value {
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            status(AppError::NotFound("Usuario no encontrado".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(AppError::BadRequest("cuerpo inválido".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(AppError::Validation(ValidationErrors::single(
                FieldError::required("nombre", "string")
            ))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_duplicate_maps_to_conflict() {
        assert_eq!(
            status(AppError::Account(AccountError::Duplicate(
                "Ya existe un usuario con ese correo".to_string()
            ))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(AppError::Database(RepositoryError::Conflict(
                "Ya existe un usuario con ese correo".to_string()
            ))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_store_failure_maps_to_internal() {
        assert_eq!(
            status(AppError::Database(RepositoryError::Database(
                sqlx::Error::PoolClosed
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(AppError::Account(AccountError::PasswordHash)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_body_is_redacted() {
        let body = body_json(AppError::Database(RepositoryError::Database(
            sqlx::Error::PoolClosed,
        )))
        .await;
        assert_eq!(body, serde_json::json!({ "error": INTERNAL_MESSAGE }));
    }

    #[tokio::test]
    async fn test_conflict_body_names_the_field() {
        let body = body_json(AppError::Account(AccountError::Duplicate(
            "Ya existe un usuario con ese correo".to_string(),
        )))
        .await;
        assert_eq!(
            body,
            serde_json::json!({ "error": "Ya existe un usuario con ese correo" })
        );
    }

    #[tokio::test]
    async fn test_validation_body_is_structured() {
        let body = body_json(AppError::Validation(ValidationErrors::single(
            FieldError::required("correo", "string"),
        )))
        .await;
        let errors = body.get("error").unwrap().as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["path"], serde_json::json!(["correo"]));
        assert_eq!(errors[0]["message"], "Required");
    }
}
