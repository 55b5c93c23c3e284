//! Registration and login.

use super::message;
use crate::{
    errors::AppError,
    extract::AppJson,
    services::{account_service::AccountService, token_service::TokenService},
};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Body of `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterReq {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST `/auth/register` — create an account.
pub async fn register(
    State(accounts): State<AccountService>,
    AppJson(payload): AppJson<RegisterReq>,
) -> Result<impl IntoResponse, AppError> {
    accounts.register(&payload.username, &payload.password).await?;
    Ok((StatusCode::CREATED, message("New user created!")))
}

/// GET `/auth/login` — exchange Basic credentials for an access token.
///
/// Every failure answers 401 with a Basic challenge, without telling
/// unknown users apart from wrong passwords.
pub async fn login(
    State(accounts): State<AccountService>,
    State(tokens): State<TokenService>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, AppError> {
    let (username, password) = basic_credentials(&headers).ok_or_else(AppError::login_required)?;

    let user = accounts.authenticate(&username, &password).await?;
    let token = tokens.issue(&user.username)?;

    info!(user_id = %user.id, "issued token for {}", user.username);
    Ok(Json(TokenResponse { token }))
}

/// Decode `Authorization: Basic base64(user:password)`.
///
/// Returns None unless both parts are present and non-empty.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = general_purpose::STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    if username.is_empty() || password.is_empty() {
        return None;
    }
    Some((username.to_string(), password.to_string()))
}
