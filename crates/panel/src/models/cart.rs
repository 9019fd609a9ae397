//! Cart domain types.

use serde::Serialize;

use verve_core::{ProductId, SizeId, UserId};

/// A cart line item.
///
/// At most one row exists per (user, product, size) triple; adding the same
/// pairing again increments `count` instead of inserting a duplicate.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartItem {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub size_id: SizeId,
    pub count: i32,
}

/// A single (size, count) entry of a cart submission.
#[derive(Debug, Clone, Copy)]
pub struct CartEntry {
    pub size: SizeId,
    pub count: i32,
}
