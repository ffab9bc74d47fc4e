//! User repository for database operations.
//!
//! All queries are parameterized. Uniqueness of `correo` and
//! `numero_identificacion` is delegated to the storage constraints declared
//! in the migrations; this module translates unique violations into
//! [`RepositoryError::Conflict`] by constraint name, so concurrent creations
//! can never both succeed with the same value.

use sqlx::PgPool;

use botica_core::schema::profile::ProfileUpdateData;
use botica_core::{Email, IdentificationNumber, PhoneNumber, UserId};

use super::RepositoryError;
use crate::models::user::{
    DeletedUser, NewUser, Profile, UpdatedProfile, UserFilter, UserKey, UserSummary,
};

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List users, optionally narrowed to a unique key.
    ///
    /// A filter on `id` or `numero_identificacion` yields at most one row;
    /// an empty filter yields every user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &UserFilter) -> Result<Vec<UserSummary>, RepositoryError> {
        let rows = match (filter.id, filter.numero_identificacion.as_ref()) {
            (Some(id), _) => {
                sqlx::query_as::<_, UserSummary>(
                    "SELECT id, nombre, numero_identificacion FROM usuarios WHERE id = $1",
                )
                .bind(id)
                .fetch_all(self.pool)
                .await?
            }
            (None, Some(numero)) => {
                sqlx::query_as::<_, UserSummary>(
                    "SELECT id, nombre, numero_identificacion FROM usuarios \
                     WHERE numero_identificacion = $1",
                )
                .bind(numero)
                .fetch_all(self.pool)
                .await?
            }
            (None, None) => {
                sqlx::query_as::<_, UserSummary>(
                    "SELECT id, nombre, numero_identificacion FROM usuarios ORDER BY nombre",
                )
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    /// Insert a new user and return the persisted identification number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the `correo` or
    /// `numero_identificacion` is already registered.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, user: &NewUser) -> Result<IdentificationNumber, RepositoryError> {
        let (numero_identificacion,) = sqlx::query_as::<_, (IdentificationNumber,)>(
            "INSERT INTO usuarios \
                 (nombre, correo, numero_identificacion, contrasena, \
                  identificacion_id, numero_celular) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING numero_identificacion",
        )
        .bind(&user.nombre)
        .bind(&user.correo)
        .bind(&user.numero_identificacion)
        .bind(&user.contrasena_hash)
        .bind(user.identificacion_id)
        .bind(&user.numero_celular)
        .fetch_one(self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(numero_identificacion)
    }

    /// Delete a user by unique key, returning the deleted row's
    /// identifying fields.
    ///
    /// Returns `None` when no row matched; callers treat that as
    /// not-found, never as success.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, key: &UserKey) -> Result<Option<DeletedUser>, RepositoryError> {
        let row = match key {
            UserKey::Id(id) => {
                sqlx::query_as::<_, DeletedUser>(
                    "DELETE FROM usuarios WHERE id = $1 \
                     RETURNING id, nombre, numero_identificacion",
                )
                .bind(*id)
                .fetch_optional(self.pool)
                .await?
            }
            UserKey::NumeroIdentificacion(numero) => {
                sqlx::query_as::<_, DeletedUser>(
                    "DELETE FROM usuarios WHERE numero_identificacion = $1 \
                     RETURNING id, nombre, numero_identificacion",
                )
                .bind(numero)
                .fetch_optional(self.pool)
                .await?
            }
        };

        Ok(row)
    }

    /// Fetch a user's flattened shipping profile.
    ///
    /// Joins `usuarios`, `identificaciones` and `direccion_envios`; a user
    /// without a shipping address row yields `None`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_profile(&self, id: UserId) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query_as::<_, Profile>(
            "SELECT u.nombre, u.correo, u.numero_celular, \
                    i.tipo AS identificacion, \
                    d.ciudad, d.barrio, d.direccion, d.codigo_postal \
             FROM usuarios u \
             JOIN identificaciones i ON i.id = u.identificacion_id \
             JOIN direccion_envios d ON d.usuario_id = u.id \
             WHERE u.id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Update a user's contact fields and shipping address in one
    /// transaction.
    ///
    /// Both statements must affect a row; otherwise the transaction is
    /// rolled back and `None` is returned. A failure after the first
    /// update therefore never leaves partial state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the new `correo` is already
    /// registered to another user.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdateData,
    ) -> Result<Option<UpdatedProfile>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let contact = sqlx::query_as::<_, (Email, PhoneNumber)>(
            "UPDATE usuarios SET correo = $1, numero_celular = $2 \
             WHERE id = $3 \
             RETURNING correo, numero_celular",
        )
        .bind(&update.correo)
        .bind(&update.numero_celular)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        let Some((correo, numero_celular)) = contact else {
            tx.rollback().await?;
            return Ok(None);
        };

        let address = sqlx::query_as::<_, (String, String, String, String)>(
            "UPDATE direccion_envios \
             SET ciudad = $1, barrio = $2, direccion = $3, codigo_postal = $4 \
             WHERE usuario_id = $5 \
             RETURNING ciudad, barrio, direccion, codigo_postal",
        )
        .bind(&update.ciudad)
        .bind(&update.barrio)
        .bind(&update.direccion)
        .bind(&update.codigo_postal)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((ciudad, barrio, direccion, codigo_postal)) = address else {
            tx.rollback().await?;
            return Ok(None);
        };

        tx.commit().await?;

        Ok(Some(UpdatedProfile {
            correo,
            numero_celular,
            ciudad,
            barrio,
            direccion,
            codigo_postal,
        }))
    }
}

/// Translate a unique-constraint violation into a conflict error naming
/// the colliding field.
fn map_unique_violation(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        let message = match db_err.constraint() {
            Some("usuarios_correo_key") => "Ya existe un usuario con ese correo",
            Some("usuarios_numero_identificacion_key") => {
                "Ya existe un usuario con ese número de identificación"
            }
            _ => "El usuario ya existe",
        };
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(e)
}
