//! Baked good repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;

use bakehouse_core::{BakedGoodId, BakeryId};

use super::RepositoryError;
use crate::models::BakedGood;

/// A validated new baked good, ready to insert.
#[derive(Debug, Clone)]
pub struct NewBakedGood {
    pub name: String,
    pub price: f64,
    pub bakery_id: BakeryId,
}

/// A validated partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct BakedGoodPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
}

/// Repository for baked good database operations.
pub struct BakedGoodRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BakedGoodRepository<'a> {
    /// Create a new baked good repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all baked goods, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<BakedGood>, RepositoryError> {
        let goods = sqlx::query_as::<_, BakedGood>(
            "SELECT id, name, price, bakery_id, created_at FROM baked_goods ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(goods)
    }

    /// List all baked goods ordered by price, most expensive first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_price_desc(&self) -> Result<Vec<BakedGood>, RepositoryError> {
        let goods = sqlx::query_as::<_, BakedGood>(
            "SELECT id, name, price, bakery_id, created_at FROM baked_goods \
             ORDER BY price DESC, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(goods)
    }

    /// Get the single most expensive baked good, if any exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn most_expensive(&self) -> Result<Option<BakedGood>, RepositoryError> {
        let good = sqlx::query_as::<_, BakedGood>(
            "SELECT id, name, price, bakery_id, created_at FROM baked_goods \
             ORDER BY price DESC, id LIMIT 1",
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(good)
    }

    /// Get a baked good by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: BakedGoodId) -> Result<Option<BakedGood>, RepositoryError> {
        let good = sqlx::query_as::<_, BakedGood>(
            "SELECT id, name, price, bakery_id, created_at FROM baked_goods WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(good)
    }

    /// List the baked goods owned by a bakery, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_bakery(
        &self,
        bakery_id: BakeryId,
    ) -> Result<Vec<BakedGood>, RepositoryError> {
        let goods = sqlx::query_as::<_, BakedGood>(
            "SELECT id, name, price, bakery_id, created_at FROM baked_goods \
             WHERE bakery_id = ? ORDER BY id",
        )
        .bind(bakery_id)
        .fetch_all(self.pool)
        .await?;

        Ok(goods)
    }

    /// Insert a new baked good and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if `bakery_id` violates the
    /// foreign-key constraint.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewBakedGood) -> Result<BakedGood, RepositoryError> {
        let good = sqlx::query_as::<_, BakedGood>(
            "INSERT INTO baked_goods (name, price, bakery_id, created_at) \
             VALUES (?, ?, ?, ?) \
             RETURNING id, name, price, bakery_id, created_at",
        )
        .bind(&new.name)
        .bind(new.price)
        .bind(new.bakery_id)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.message().contains("FOREIGN KEY")
            {
                return RepositoryError::Conflict(
                    "bakery_id does not reference an existing bakery".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })?;

        Ok(good)
    }

    /// Apply a partial update, returning the updated row.
    ///
    /// `None` fields keep their stored values. Returns `None` if no baked
    /// good with the given ID exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        id: BakedGoodId,
        patch: &BakedGoodPatch,
    ) -> Result<Option<BakedGood>, RepositoryError> {
        let good = sqlx::query_as::<_, BakedGood>(
            "UPDATE baked_goods \
             SET name = COALESCE(?, name), price = COALESCE(?, price) \
             WHERE id = ? \
             RETURNING id, name, price, bakery_id, created_at",
        )
        .bind(patch.name.as_deref())
        .bind(patch.price)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(good)
    }

    /// Delete a baked good. Returns `true` if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: BakedGoodId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM baked_goods WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
