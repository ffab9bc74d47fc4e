//! User domain types.

use serde::Serialize;
use sqlx::FromRow;

use botica_core::{Email, IdentificationNumber, IdentificationTypeId, PhoneNumber, UserId};

/// A user row as returned by list queries.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserSummary {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub nombre: String,
    /// National identification number.
    pub numero_identificacion: IdentificationNumber,
}

/// Data for inserting a new user.
///
/// Carries the password only as a finished Argon2 hash. The struct is
/// deliberately not `Serialize`: neither the hash nor any other creation
/// field ever appears in a response payload.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub nombre: String,
    pub correo: Email,
    pub numero_identificacion: IdentificationNumber,
    pub contrasena_hash: String,
    pub identificacion_id: IdentificationTypeId,
    pub numero_celular: PhoneNumber,
}

/// Identifying fields of a deleted user, returned for confirmation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DeletedUser {
    pub id: UserId,
    pub nombre: String,
    pub numero_identificacion: IdentificationNumber,
}

/// Filter for user list queries. A unique key selects a single row;
/// an empty filter selects all users.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub id: Option<UserId>,
    pub numero_identificacion: Option<IdentificationNumber>,
}

/// Unique key identifying a user for deletion.
///
/// Deletion always requires a key; absence is unrepresentable.
#[derive(Debug, Clone)]
pub enum UserKey {
    Id(UserId),
    NumeroIdentificacion(IdentificationNumber),
}

/// A user's flattened shipping profile: contact fields joined with the
/// identification type and the shipping address.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub nombre: String,
    pub correo: Email,
    pub numero_celular: PhoneNumber,
    /// Identification type name (e.g., "Cédula de Ciudadanía").
    pub identificacion: String,
    pub ciudad: String,
    pub barrio: String,
    pub direccion: String,
    pub codigo_postal: String,
}

/// The combined record written by a profile update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatedProfile {
    pub correo: Email,
    pub numero_celular: PhoneNumber,
    pub ciudad: String,
    pub barrio: String,
    pub direccion: String,
    pub codigo_postal: String,
}
