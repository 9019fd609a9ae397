//! Cart route handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use verve_core::{ProductId, SizeId};

use crate::db::CartRepository;
use crate::error::AppError;
use crate::middleware::auth::RequireAuth;
use crate::models::cart::{CartEntry, CartItem};
use crate::state::AppState;

/// Cart listing response body.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub data: Vec<CartItem>,
}

/// List the caller's cart.
///
/// An empty cart is a normal 200 with an empty list.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Response, AppError> {
    let repo = CartRepository::new(state.pool());
    let data = repo.list_by_user(user.id).await?;

    Ok((StatusCode::OK, Json(CartResponse { data })).into_response())
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: Option<ProductId>,
    pub cart: Option<Vec<CartEntryInput>>,
}

/// A single (size, count) entry of an add-to-cart request.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CartEntryInput {
    pub size: SizeId,
    pub count: i32,
}

/// Validate an add-to-cart request before any database work.
fn validate(request: &AddToCartRequest) -> Result<(ProductId, Vec<CartEntry>), AppError> {
    let product_id = request
        .product_id
        .ok_or_else(|| AppError::BadRequest("product_id is required".to_string()))?;

    let entries = request.cart.as_deref().unwrap_or_default();
    if entries.is_empty() {
        return Err(AppError::BadRequest(
            "cart must be a non-empty list".to_string(),
        ));
    }

    if entries.iter().any(|entry| entry.count < 1) {
        return Err(AppError::BadRequest(
            "cart entry count must be positive".to_string(),
        ));
    }

    let entries = entries
        .iter()
        .map(|entry| CartEntry {
            size: entry.size,
            count: entry.count,
        })
        .collect();

    Ok((product_id, entries))
}

/// Add-to-cart response body.
#[derive(Debug, Serialize)]
pub struct AddToCartResponse {
    pub msg: String,
}

/// Add one or more line items for a product to the caller's cart.
///
/// Entries merge into existing (product, size) rows; the whole submission is
/// all-or-nothing.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<AddToCartRequest>,
) -> Result<Response, AppError> {
    let (product_id, entries) = validate(&request)?;

    let repo = CartRepository::new(state.pool());
    repo.add_items(user.id, product_id, &entries).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddToCartResponse {
            msg: "added to cart".to_string(),
        }),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(size: i32, count: i32) -> CartEntryInput {
        CartEntryInput {
            size: SizeId::new(size),
            count,
        }
    }

    #[test]
    fn test_validate_missing_product_id() {
        let request = AddToCartRequest {
            product_id: None,
            cart: Some(vec![entry(1, 2)]),
        };

        assert!(matches!(validate(&request), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_validate_missing_cart() {
        let request = AddToCartRequest {
            product_id: Some(ProductId::new(1)),
            cart: None,
        };

        assert!(matches!(validate(&request), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_validate_empty_cart() {
        let request = AddToCartRequest {
            product_id: Some(ProductId::new(1)),
            cart: Some(Vec::new()),
        };

        assert!(matches!(validate(&request), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_validate_rejects_non_positive_count() {
        let request = AddToCartRequest {
            product_id: Some(ProductId::new(1)),
            cart: Some(vec![entry(1, 2), entry(2, 0)]),
        };

        assert!(matches!(validate(&request), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_validate_accepts_well_formed_request() {
        let request = AddToCartRequest {
            product_id: Some(ProductId::new(9)),
            cart: Some(vec![entry(1, 2), entry(2, 3)]),
        };

        let (product_id, entries) = match validate(&request) {
            Ok(validated) => validated,
            Err(e) => panic!("expected valid request, got {e}"),
        };
        assert_eq!(product_id, ProductId::new(9));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].count, 2);
        assert_eq!(entries[1].count, 3);
    }

    #[test]
    fn test_request_body_deserializes() {
        let request: AddToCartRequest =
            serde_json::from_str(r#"{"product_id": 4, "cart": [{"size": 2, "count": 1}]}"#)
                .unwrap_or_else(|e| panic!("deserialization failed: {e}"));

        assert_eq!(request.product_id, Some(ProductId::new(4)));
        assert_eq!(request.cart.as_deref().map(<[CartEntryInput]>::len), Some(1));
    }
}
