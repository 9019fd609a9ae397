//! HTTP route handlers for the account panel.
//!
//! # Route Structure
//!
//! ```text
//! GET   /health              - Liveness check
//! GET   /health/ready        - Readiness check (verifies database)
//!
//! # Account panel (requires upstream-authenticated identity)
//! GET   /profile             - Fetch the caller's profile
//! PATCH /profile             - Partial profile update (multipart, optional image)
//! GET   /cart                - List the caller's cart
//! POST  /cart                - Add items to the caller's cart
//! GET   /transactions        - Paginated transaction history
//! ```

pub mod cart;
pub mod profile;
pub mod transactions;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the account panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile::show).patch(profile::update))
        .route("/cart", get(cart::index).post(cart::add))
        .route("/transactions", get(transactions::index))
}
