//! Category repository for database operations.

use sqlx::PgPool;

use botica_core::CategoryId;

use super::RepositoryError;
use crate::models::category::{Category, CategorySummary};

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories. An empty result is a valid outcome; the
    /// handler decides how to report it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<CategorySummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategorySummary>(
            "SELECT id, nombre FROM categorias ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a new category and return the persisted row.
    ///
    /// The name is expected to arrive already lower-cased; `activa`
    /// defaults to true at the storage layer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, nombre: &str) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, Category>(
            "INSERT INTO categorias (nombre) VALUES ($1) RETURNING id, nombre, activa",
        )
        .bind(nombre)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// Delete a category by id, returning the deleted row.
    ///
    /// Returns `None` when no row matched; callers treat that as
    /// not-found.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, Category>(
            "DELETE FROM categorias WHERE id = $1 RETURNING id, nombre, activa",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }
}
