//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! # Users
//! GET    /usuarios               - List users (filter by id or numero_identificacion)
//! POST   /usuarios               - Create user (201, returns numero_identificacion)
//! DELETE /usuarios/{id}          - Delete user by id
//! GET    /usuarios/{id}/profile  - Shipping profile (joined with address)
//! PUT    /usuarios/{id}/profile  - Update contact fields + shipping address
//!
//! # Categories
//! GET    /categorias             - List categories (404 when none exist)
//! POST   /categorias             - Create category (name lower-cased)
//! DELETE /categorias/{id}        - Delete category by id
//! ```
//!
//! Handlers follow one shape: extract, normalize (lower-case `nombre` and
//! `correo` where applicable), validate against the entity schema, call the
//! repository, map the outcome through [`crate::error::AppError`].

pub mod categorias;
pub mod usuarios;

use axum::{
    Router,
    routing::{delete, get},
};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::state::AppState;

/// Create the user routes router.
pub fn usuario_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(usuarios::list).post(usuarios::create))
        .route("/{id}", delete(usuarios::remove))
        .route(
            "/{id}/profile",
            get(usuarios::get_profile).put(usuarios::update_profile),
        )
}

/// Create the category routes router.
pub fn categoria_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categorias::list).post(categorias::create))
        .route("/{id}", delete(categorias::remove))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/usuarios", usuario_routes())
        .nest("/categorias", categoria_routes())
}

/// Require the request body to be a JSON object.
fn into_object(body: Value) -> Result<Map<String, Value>, AppError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::BadRequest(
            "Se esperaba un objeto JSON".to_string(),
        )),
    }
}

/// Lower-case a string field in place, if present.
fn lowercase_field(input: &mut Map<String, Value>, name: &str) {
    if let Some(Value::String(s)) = input.get_mut(name) {
        *s = s.to_lowercase();
    }
}
