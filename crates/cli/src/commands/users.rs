//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! # Delete by id
//! botica users delete --id 11111111-2222-3333-4444-555555555555
//!
//! # Delete by identification number
//! botica users delete --numero-identificacion 10203040
//! ```
//!
//! # Environment Variables
//!
//! - `BOTICA_DATABASE_URL` - `PostgreSQL` connection string

use thiserror::Error;

use botica_api::config::{ApiConfig, ConfigError};
use botica_api::db::users::UserRepository;
use botica_api::db::{self, RepositoryError};
use botica_api::models::user::UserKey;
use botica_core::{IdentificationNumber, UserId};

/// Errors that can occur during user management operations.
#[derive(Debug, Error)]
pub enum UsersError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No deletion key was supplied.
    #[error("Provide --id or --numero-identificacion")]
    MissingKey,

    /// The supplied id is not a UUID.
    #[error("Invalid user id: {0}")]
    InvalidId(String),

    /// The supplied identification number is malformed.
    #[error("Invalid identification number: {0}")]
    InvalidIdentification(String),

    /// No user matched the key.
    #[error("No user matched the given key")]
    NotFound,

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Delete a user by id or identification number.
///
/// # Errors
///
/// Returns `UsersError` if no key is given, the key is malformed, no user
/// matches, or the database operation fails.
pub async fn delete(
    id: Option<&str>,
    numero_identificacion: Option<&str>,
) -> Result<(), UsersError> {
    dotenvy::dotenv().ok();

    let key = match (id, numero_identificacion) {
        (Some(raw), _) => UserKey::Id(
            UserId::parse(raw).map_err(|_| UsersError::InvalidId(raw.to_owned()))?,
        ),
        (None, Some(raw)) => UserKey::NumeroIdentificacion(
            IdentificationNumber::parse(raw)
                .map_err(|_| UsersError::InvalidIdentification(raw.to_owned()))?,
        ),
        (None, None) => return Err(UsersError::MissingKey),
    };

    let config = ApiConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    let deleted = UserRepository::new(&pool)
        .delete(&key)
        .await?
        .ok_or(UsersError::NotFound)?;

    tracing::info!(
        "User deleted: {} ({}, numero_identificacion {})",
        deleted.id,
        deleted.nombre,
        deleted.numero_identificacion
    );

    Ok(())
}
