//! Account service error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// A unique field (`correo` or `numero_identificacion`) is already
    /// registered.
    #[error("duplicate user: {0}")]
    Duplicate(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
