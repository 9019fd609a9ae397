//! Transaction history domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use verve_core::{TransactionId, UserId};

/// A completed order, written by the checkout flow and read-only here.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub invoice_number: String,
    pub total: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Pagination metadata returned alongside a page of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total_count: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub per_page: i64,
}

impl PageMeta {
    /// Build metadata for a page.
    ///
    /// `total_pages` rounds up, so a partial final page counts as a page.
    #[must_use]
    pub const fn new(total_count: i64, current_page: i64, per_page: i64) -> Self {
        Self {
            total_count,
            total_pages: (total_count + per_page - 1) / per_page,
            current_page,
            per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_meta_rounds_up() {
        let meta = PageMeta::new(11, 1, 5);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn test_page_meta_exact_fit() {
        let meta = PageMeta::new(10, 2, 5);
        assert_eq!(meta.total_pages, 2);
    }

    #[test]
    fn test_page_meta_empty() {
        let meta = PageMeta::new(0, 1, 10);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.current_page, 1);
    }
}
