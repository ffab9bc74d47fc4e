//! User route handlers.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::{Map, Value};

use botica_core::schema::{self, Mode};
use botica_core::{IdentificationNumber, UserId};

use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::models::user::{
    DeletedUser, Profile, UpdatedProfile, UserFilter, UserKey, UserSummary,
};
use crate::services::accounts::AccountService;
use crate::state::AppState;

use super::{into_object, lowercase_field};

/// Not-found message shared by the user lookup paths.
const USUARIO_NO_ENCONTRADO: &str = "Usuario no encontrado";

/// List users, optionally filtered by a unique key.
///
/// `GET /usuarios?id=...` or `GET /usuarios?numero_identificacion=...`
///
/// Only the recognized filter parameters are validated; anything else in
/// the query string is ignored.
///
/// # Errors
///
/// Returns 400 with field errors for an invalid filter, 500 on store
/// failure.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<UserSummary>>> {
    let mut input = Map::new();
    for key in ["id", "numero_identificacion"] {
        if let Some(value) = params.get(key) {
            input.insert(key.to_owned(), Value::String(value.clone()));
        }
    }
    let data = schema::user::validate(&input, Mode::Partial)?;
    let filter = UserFilter {
        id: data.id,
        numero_identificacion: data.numero_identificacion,
    };

    let users = UserRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(users))
}

/// Response body for a successful user creation.
///
/// Deliberately carries nothing but the persisted identification number;
/// in particular, no password material.
#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub numero_identificacion: IdentificationNumber,
}

/// Create a new user.
///
/// `POST /usuarios`
///
/// `nombre` and `correo` are lower-cased before validation. The full
/// schema applies: every creation field must be present and valid.
///
/// # Errors
///
/// Returns 400 with field errors on validation failure, 409 when the
/// `correo` or `numero_identificacion` is already registered, 500 on
/// store failure.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<CreatedUser>)> {
    let mut input = into_object(body)?;
    lowercase_field(&mut input, "nombre");
    lowercase_field(&mut input, "correo");

    let data = schema::user::validate_new(&input)?;

    let service = AccountService::new(state.pool(), state.config().hash_cost);
    let numero_identificacion = service.create_user(data).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedUser {
            numero_identificacion,
        }),
    ))
}

/// Response body for a successful user deletion.
#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub message: &'static str,
    pub result: DeletedUser,
}

/// Delete a user by id.
///
/// `DELETE /usuarios/{id}`
///
/// # Errors
///
/// Returns 400 for a malformed id, 404 when no user matched, 500 on store
/// failure.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteUserResponse>> {
    let id = validate_user_id(&id)?;

    let deleted = UserRepository::new(state.pool())
        .delete(&UserKey::Id(id))
        .await?
        .ok_or_else(|| AppError::NotFound(USUARIO_NO_ENCONTRADO.to_string()))?;

    Ok(Json(DeleteUserResponse {
        message: "Usuario eliminado",
        result: deleted,
    }))
}

/// Fetch a user's shipping profile.
///
/// `GET /usuarios/{id}/profile`
///
/// # Errors
///
/// Returns 400 for a malformed id, 404 when the user has no profile row,
/// 500 on store failure.
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Profile>> {
    let id = validate_user_id(&id)?;

    let profile = UserRepository::new(state.pool())
        .get_profile(id)
        .await?
        .ok_or_else(|| AppError::NotFound(USUARIO_NO_ENCONTRADO.to_string()))?;

    Ok(Json(profile))
}

/// Response body for a successful profile update.
#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub result: UpdatedProfile,
    pub message: &'static str,
}

/// Update a user's contact fields and shipping address.
///
/// `PUT /usuarios/{id}/profile`
///
/// `correo` is lower-cased before validation. Both updates run in one
/// transaction; a missing user or address row rolls everything back.
///
/// # Errors
///
/// Returns 400 with field errors on validation failure, 404 when the user
/// or its address row is missing, 409 when the new `correo` belongs to
/// another user, 500 on store failure.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<UpdateProfileResponse>)> {
    let id = validate_user_id(&id)?;

    let mut input = into_object(body)?;
    lowercase_field(&mut input, "correo");

    let data = schema::profile::validate_update(&input)?;

    let updated = UserRepository::new(state.pool())
        .update_profile(id, &data)
        .await?
        .ok_or_else(|| AppError::NotFound(USUARIO_NO_ENCONTRADO.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(UpdateProfileResponse {
            result: updated,
            message: "Perfil actualizado",
        }),
    ))
}

/// Validate a path id through the user schema.
fn validate_user_id(raw: &str) -> Result<UserId> {
    let mut input = Map::new();
    input.insert("id".to_owned(), Value::String(raw.to_owned()));
    let data = schema::user::validate(&input, Mode::Partial)?;
    data.id
        .ok_or_else(|| AppError::BadRequest("El id no es válido".to_string()))
}
