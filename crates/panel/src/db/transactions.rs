//! Transaction history repository.
//!
//! Transactions are written by the checkout flow; this repository only reads
//! them, newest first, one page at a time.

use sqlx::PgPool;

use verve_core::UserId;

use super::RepositoryError;
use crate::models::transaction::{PageMeta, Transaction};

/// Zero-based row offset of a 1-based page.
const fn page_offset(page: i64, per_page: i64) -> i64 {
    (page - 1) * per_page
}

/// Repository for transaction history reads.
pub struct TransactionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TransactionRepository<'a> {
    /// Create a new transaction repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one page of a user's transactions plus pagination metadata.
    ///
    /// `page` is 1-based; the offset is `(page - 1) * per_page`. Callers are
    /// expected to pass already-clamped positive values.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn page_by_user(
        &self,
        user_id: UserId,
        page: i64,
        per_page: i64,
    ) -> Result<(PageMeta, Vec<Transaction>), RepositoryError> {
        let total_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM transactions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        let offset = page_offset(page, per_page);

        let rows = sqlx::query_as::<_, Transaction>(
            r"
            SELECT id, user_id, invoice_number, total, status, created_at
            FROM transactions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id)
        .bind(per_page)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok((PageMeta::new(total_count, page, per_page), rows))
    }
}
