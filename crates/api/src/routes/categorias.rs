//! Category route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Map, Value};

use botica_core::CategoryId;
use botica_core::schema::{self, FieldError, Mode, ValidationErrors};

use crate::db::categories::CategoryRepository;
use crate::error::{AppError, Result};
use crate::models::category::{Category, CategorySummary};
use crate::state::AppState;

use super::{into_object, lowercase_field};

/// List all categories.
///
/// `GET /categorias`
///
/// An empty catalogue is reported as 404 "No existen categorias". That is
/// the observed policy of this API, kept deliberately.
///
/// # Errors
///
/// Returns 404 when no categories exist, 500 on store failure.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CategorySummary>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;

    if categories.is_empty() {
        return Err(AppError::NotFound("No existen categorias".to_string()));
    }

    Ok(Json(categories))
}

/// Create a new category.
///
/// `POST /categorias`
///
/// The name is lower-cased before validation and storage.
///
/// # Errors
///
/// Returns 400 with field errors on validation failure, 500 on store
/// failure.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Category>)> {
    let mut input = into_object(body)?;
    lowercase_field(&mut input, "nombre");

    let data = schema::category::validate(&input, Mode::Partial)?;
    let Some(nombre) = data.nombre else {
        return Err(ValidationErrors::single(FieldError::required("nombre", "string")).into());
    };

    let category = CategoryRepository::new(state.pool()).create(&nombre).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Delete a category by id.
///
/// `DELETE /categorias/{id}`
///
/// # Errors
///
/// Returns 400 for a non-numeric id, 404 when no category matched, 500 on
/// store failure.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Category>> {
    let id = validate_category_id(&id)?;

    let category = CategoryRepository::new(state.pool())
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound("No existe la categoria".to_string()))?;

    Ok(Json(category))
}

/// Validate a path id through the category schema.
fn validate_category_id(raw: &str) -> Result<CategoryId> {
    let Ok(numeric) = raw.parse::<i64>() else {
        return Err(
            ValidationErrors::single(FieldError::invalid_type("id", "number", "string")).into(),
        );
    };

    let mut input = Map::new();
    input.insert("id".to_owned(), Value::Number(numeric.into()));
    let data = schema::category::validate(&input, Mode::Partial)?;
    data.id
        .ok_or_else(|| AppError::BadRequest("El id no es válido".to_string()))
}
