//! Cart repository for database operations.
//!
//! Cart rows are keyed by (user, product, size); submitting an existing
//! pairing increments the stored count instead of inserting a duplicate.

use sqlx::PgPool;

use verve_core::{ProductId, UserId};

use super::RepositoryError;
use crate::models::cart::{CartEntry, CartItem};

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get all cart rows owned by a user.
    ///
    /// An empty cart returns an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItem>(
            r"
            SELECT user_id, product_id, size_id, count
            FROM carts
            WHERE user_id = $1
            ORDER BY product_id, size_id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Add entries for one product to a user's cart, merging counts.
    ///
    /// All entries are applied inside a single transaction: for each entry,
    /// an existing (user, product, size) row has its count incremented,
    /// otherwise a new row is inserted. Any statement failure rolls the whole
    /// submission back, leaving no partial writes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn add_items(
        &self,
        user_id: UserId,
        product_id: ProductId,
        entries: &[CartEntry],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for entry in entries {
            let updated = sqlx::query(
                r"
                UPDATE carts SET count = count + $1
                WHERE user_id = $2 AND product_id = $3 AND size_id = $4
                ",
            )
            .bind(entry.count)
            .bind(user_id)
            .bind(product_id)
            .bind(entry.size)
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                sqlx::query(
                    r"
                    INSERT INTO carts (user_id, product_id, size_id, count)
                    VALUES ($1, $2, $3, $4)
                    ",
                )
                .bind(user_id)
                .bind(product_id)
                .bind(entry.size)
                .bind(entry.count)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(())
    }
}
