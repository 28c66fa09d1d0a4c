//! Bearer-token authentication for dashboard routes.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use tracing::debug;

use crate::context::ServiceContext;
use crate::error::AppError;
use crate::ports::AuthUser;

/// Extracts the token from an `Authorization: Bearer <token>` header.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!token.is_empty()).then_some(token)
}

/// Resolves the signed-in user from the request headers.
///
/// # Errors
///
/// Returns [`AppError::Unauthorized`] when the header is missing or the
/// identity provider rejects the token, and [`AppError::Backend`] when the
/// provider cannot be reached.
pub async fn authenticate(ctx: &ServiceContext, headers: &HeaderMap) -> Result<AuthUser, AppError> {
    let Some(token) = bearer_token(headers) else {
        return Err(AppError::unauthorized());
    };

    match ctx.identity.user_for_token(token).await? {
        Some(user) => Ok(user),
        None => {
            debug!("Rejected access token");
            Err(AppError::unauthorized())
        }
    }
}
