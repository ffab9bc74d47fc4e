//! Account service.
//!
//! Owns the side-effects of user creation that do not belong in a
//! repository: hashing the password and translating storage conflicts into
//! account-level errors. The plaintext password stops here; only the
//! finished hash travels onward, and no response type ever carries it.

mod error;

pub use error::AccountError;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use botica_core::IdentificationNumber;
use botica_core::schema::user::NewUserData;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::NewUser;

/// Argon2 memory cost in KiB (the crate's default, pinned so a library
/// upgrade cannot silently change stored-hash parameters).
const HASH_MEMORY_KIB: u32 = 19_456;
/// Argon2 lane count.
const HASH_LANES: u32 = 1;

/// Account service.
///
/// Handles user creation on top of [`UserRepository`].
pub struct AccountService<'a> {
    users: UserRepository<'a>,
    hash_cost: u32,
}

impl<'a> AccountService<'a> {
    /// Create a new account service.
    ///
    /// `hash_cost` is the Argon2 iteration count taken from configuration.
    #[must_use]
    pub const fn new(pool: &'a PgPool, hash_cost: u32) -> Self {
        Self {
            users: UserRepository::new(pool),
            hash_cost,
        }
    }

    /// Create a new user from a validated creation payload.
    ///
    /// Hashes the password with Argon2id and inserts the row; uniqueness
    /// is enforced by the storage constraints, so a concurrent creation
    /// with the same `correo` or `numero_identificacion` surfaces as
    /// [`AccountError::Duplicate`] rather than a second row.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Duplicate` if a unique field is taken.
    /// Returns `AccountError::PasswordHash` if hashing fails.
    /// Returns `AccountError::Repository` for other database errors.
    pub async fn create_user(
        &self,
        data: NewUserData,
    ) -> Result<IdentificationNumber, AccountError> {
        let contrasena_hash = hash_password(data.contrasena.expose_secret(), self.hash_cost)?;

        let new_user = NewUser {
            nombre: data.nombre,
            correo: data.correo,
            numero_identificacion: data.numero_identificacion,
            contrasena_hash,
            identificacion_id: data.identificacion_id,
            numero_celular: data.numero_celular,
        };

        self.users.create(&new_user).await.map_err(|e| match e {
            RepositoryError::Conflict(message) => AccountError::Duplicate(message),
            other => AccountError::Repository(other),
        })
    }
}

/// Hash a password using Argon2id with the configured iteration cost.
fn hash_password(password: &str, cost: u32) -> Result<String, AccountError> {
    let params = Params::new(HASH_MEMORY_KIB, cost, HASH_LANES, None)
        .map_err(|_| AccountError::PasswordHash)?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AccountError::PasswordHash)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use argon2::password_hash::PasswordHash;
    use argon2::PasswordVerifier;

    #[test]
    fn test_hash_password_is_salted_argon2id() {
        let hash = hash_password("Segura123", 1).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, "Segura123");
        assert!(!hash.contains("Segura123"));

        // Fresh salt per call: hashing twice never yields the same string.
        let again = hash_password("Segura123", 1).unwrap();
        assert_ne!(hash, again);
    }

    #[test]
    fn test_hash_password_verifies() {
        let hash = hash_password("Segura123", 1).unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password("Segura123".as_bytes(), &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password("otra".as_bytes(), &parsed)
                .is_err()
        );
    }

    #[test]
    fn test_hash_cost_is_encoded_in_hash() {
        let hash = hash_password("Segura123", 3).unwrap();
        assert!(hash.contains("t=3"));
    }
}
