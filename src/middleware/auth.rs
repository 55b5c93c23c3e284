//! Token gate for the bucket list routes.
//!
//! `require_token` is attached with `route_layer` to every protected route.
//! It reads `x-access-token`, verifies it, resolves the user and stores a
//! [`CurrentUser`] in the request extensions for handlers to extract.

use crate::{
    errors::AppError,
    services::{account_service::AccountService, token_service::{TokenError, TokenService}},
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

/// Header carrying the access token on protected calls.
pub const TOKEN_HEADER: &str = "x-access-token";

/// The authenticated caller, resolved from a verified token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| TokenError::Missing.into())
    }
}

/// Verify the access token and resolve it to a user.
///
/// # Errors
///
/// 401 for a missing, malformed, expired or badly signed token, or when
/// the token names a user that does not exist.
pub async fn require_token(
    State(tokens): State<TokenService>,
    State(accounts): State<AccountService>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(TOKEN_HEADER)
        .ok_or(TokenError::Missing)?
        .to_str()
        .map_err(|_| TokenError::Malformed)?
        .trim();
    if token.is_empty() {
        return Err(TokenError::Missing.into());
    }

    let claims = tokens.verify(token).inspect_err(|err| {
        debug!("rejected token: {}", err);
    })?;

    let user = accounts
        .find_by_username(&claims.username)
        .await?
        .ok_or_else(|| TokenError::UnknownUser(claims.username.clone()))?;

    debug!(user = %user.username, "token accepted");
    request.extensions_mut().insert(CurrentUser {
        id: user.id,
        username: user.username,
    });

    Ok(next.run(request).await)
}
