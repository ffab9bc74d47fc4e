//! Category domain types.

use serde::Serialize;
use sqlx::FromRow;

use botica_core::CategoryId;

/// A full category row, returned on create and delete.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Category name, stored lower-cased.
    pub nombre: String,
    /// Whether the category is active.
    pub activa: bool,
}

/// A category row as returned by list queries.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub nombre: String,
}
