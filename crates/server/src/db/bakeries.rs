//! Bakery repository for database operations.

use sqlx::SqlitePool;

use bakehouse_core::BakeryId;

use super::RepositoryError;
use crate::models::Bakery;

/// Repository for bakery database operations.
pub struct BakeryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BakeryRepository<'a> {
    /// Create a new bakery repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all bakeries, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Bakery>, RepositoryError> {
        let bakeries = sqlx::query_as::<_, Bakery>(
            "SELECT id, name, created_at FROM bakeries ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(bakeries)
    }

    /// Get a bakery by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: BakeryId) -> Result<Option<Bakery>, RepositoryError> {
        let bakery = sqlx::query_as::<_, Bakery>(
            "SELECT id, name, created_at FROM bakeries WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(bakery)
    }

    /// Rename a bakery, returning the updated row.
    ///
    /// Returns `None` if no bakery with the given ID exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_name(
        &self,
        id: BakeryId,
        name: &str,
    ) -> Result<Option<Bakery>, RepositoryError> {
        let bakery = sqlx::query_as::<_, Bakery>(
            "UPDATE bakeries SET name = ? WHERE id = ? RETURNING id, name, created_at",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(bakery)
    }
}
