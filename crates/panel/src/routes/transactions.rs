//! Transaction history route handler.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::TransactionRepository;
use crate::error::AppError;
use crate::middleware::auth::RequireAuth;
use crate::models::transaction::{PageMeta, Transaction};
use crate::state::AppState;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PER_PAGE: i64 = 10;
const MAX_PER_PAGE: i64 = 100;

/// Pagination query parameters.
///
/// Kept as raw strings so that absent and non-numeric values both fall back
/// to the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Resolve query parameters into clamped (page, `per_page`) values.
///
/// Absent or unparsable values default to page 1, limit 10; parsed values
/// clamp to page >= 1 and 1 <= limit <= 100.
fn resolve_paging(query: &HistoryQuery) -> (i64, i64) {
    let page = query
        .page
        .as_deref()
        .and_then(|value| value.parse::<i64>().ok())
        .unwrap_or(DEFAULT_PAGE)
        .max(1);

    let per_page = query
        .limit
        .as_deref()
        .and_then(|value| value.parse::<i64>().ok())
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);

    (page, per_page)
}

/// Transaction history response body.
#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub meta: PageMeta,
    pub data: Vec<Transaction>,
}

/// Fetch one page of the caller's transaction history.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<HistoryQuery>,
) -> Result<Response, AppError> {
    let (page, per_page) = resolve_paging(&query);

    let repo = TransactionRepository::new(state.pool());
    let (meta, data) = repo.page_by_user(user.id, page, per_page).await?;

    Ok((StatusCode::OK, Json(TransactionsResponse { meta, data })).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>) -> HistoryQuery {
        HistoryQuery {
            page: page.map(ToOwned::to_owned),
            limit: limit.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn test_resolve_paging_defaults() {
        assert_eq!(resolve_paging(&query(None, None)), (1, 10));
    }

    #[test]
    fn test_resolve_paging_explicit_values() {
        assert_eq!(resolve_paging(&query(Some("2"), Some("5"))), (2, 5));
    }

    #[test]
    fn test_resolve_paging_non_numeric_falls_back() {
        assert_eq!(resolve_paging(&query(Some("abc"), Some("ten"))), (1, 10));
    }

    #[test]
    fn test_resolve_paging_clamps_non_positive() {
        assert_eq!(resolve_paging(&query(Some("0"), Some("-3"))), (1, 1));
        assert_eq!(resolve_paging(&query(Some("-1"), Some("0"))), (1, 1));
    }

    #[test]
    fn test_resolve_paging_caps_limit() {
        assert_eq!(resolve_paging(&query(Some("1"), Some("5000"))), (1, 100));
    }
}
