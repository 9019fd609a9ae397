//! Caller identity middleware and extractors.
//!
//! Authentication happens upstream (gateway session middleware); by the time
//! a request reaches this service the caller identity has already been
//! verified and is forwarded in a trusted header. `attach_identity` copies it
//! into request extensions and `RequireAuth` extracts it in handlers — the
//! identity is trusted without re-validation.

use axum::{
    Json,
    extract::{FromRequestParts, Request},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use verve_core::UserId;

/// Header carrying the authenticated user id, set by the upstream gateway.
pub const IDENTITY_HEADER: &str = "x-authenticated-user";

/// The authenticated caller, attached to the request by upstream middleware.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CurrentUser {
    pub id: UserId,
}

/// Extractor that requires an authenticated caller.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, user {}!", user.id)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when no caller identity is attached to the request.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "msg": "authentication required" })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .map(Self)
            .ok_or(AuthRejection)
    }
}

/// Middleware that copies the upstream-authenticated identity into
/// request extensions.
///
/// Requests without a parseable identity header pass through without a
/// `CurrentUser`; `RequireAuth` rejects them at extraction time.
pub async fn attach_identity(mut request: Request, next: Next) -> Response {
    let user = request
        .headers()
        .get(IDENTITY_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<i32>().ok())
        .map(|id| CurrentUser { id: UserId::new(id) });

    if let Some(user) = user {
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_require_auth_present() {
        let mut request = axum::http::Request::builder()
            .uri("/profile")
            .body(())
            .unwrap_or_default();
        request.extensions_mut().insert(CurrentUser {
            id: UserId::new(7),
        });
        let (mut parts, ()) = request.into_parts();

        let extracted = RequireAuth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(extracted, Ok(RequireAuth(user)) if user.id == UserId::new(7)));
    }

    #[tokio::test]
    async fn test_require_auth_missing() {
        let request = axum::http::Request::builder()
            .uri("/profile")
            .body(())
            .unwrap_or_default();
        let (mut parts, ()) = request.into_parts();

        let extracted = RequireAuth::from_request_parts(&mut parts, &()).await;
        assert!(extracted.is_err());
    }
}
