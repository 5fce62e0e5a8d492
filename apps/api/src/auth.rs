//! Caller identity.
//!
//! The authenticating proxy in front of the API forwards the caller's opaque id in
//! `X-User-Id`. Nothing here issues or verifies tokens.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;

pub const OWNER_HEADER: &str = "x-user-id";

/// Opaque owner id of the current caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for Owner
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| Owner(id.to_string()))
            .ok_or(AppError::Unauthorized)
    }
}
