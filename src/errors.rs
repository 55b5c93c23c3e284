use crate::services::{
    account_service::AccountError, bucket_service::BucketError, token_service::TokenError,
};
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Challenge sent with every failed login.
pub const LOGIN_CHALLENGE: &str = r#"Basic realm="Login required!""#;

/// A lightweight wrapper for general errors that keeps the message local.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    /// Value for a `WWW-Authenticate` header, if any.
    pub challenge: Option<&'static str>,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
            challenge: None,
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    /// Shortcut for 404 Not Found
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    /// Shortcut for 400 Bad Request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    /// Shortcut for 401 Unauthorized
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, msg)
    }

    /// 401 carrying the Basic auth challenge.
    pub fn login_required() -> Self {
        Self {
            challenge: Some(LOGIN_CHALLENGE),
            ..Self::unauthorized("Could not verify")
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "message": self.message,
            "status": self.status.as_u16()
        }));

        let mut response = (self.status, body).into_response();
        if let Some(challenge) = self.challenge {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(challenge),
            );
        }
        response
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("internal error: {:#}", err);
        AppError::internal("Internal server error")
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("database error: {}", err);
        AppError::internal("Internal server error")
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::UsernameTaken(_) => AppError::new(StatusCode::CONFLICT, err.to_string()),
            AccountError::InvalidCredentials => AppError::login_required(),
            AccountError::InvalidInput(msg) => AppError::bad_request(msg),
            AccountError::Hashing(msg) => {
                tracing::error!("password hashing failed: {}", msg);
                AppError::internal("Internal server error")
            }
            AccountError::Sqlx(err) => err.into(),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Missing
            | TokenError::Malformed
            | TokenError::Expired
            | TokenError::BadSignature => AppError::unauthorized(err.to_string()),
            TokenError::UnknownUser(_) => AppError::unauthorized("Token is invalid!"),
            TokenError::Encoding(err) => {
                tracing::error!("token encoding failed: {}", err);
                AppError::internal("Internal server error")
            }
        }
    }
}

impl From<BucketError> for AppError {
    fn from(err: BucketError) -> Self {
        match err {
            BucketError::BucketNotFound(_) => AppError::not_found("No bucket found!"),
            BucketError::ItemNotFound { .. } => AppError::not_found("No item found!"),
            BucketError::InvalidName { .. } => AppError::bad_request(err.to_string()),
            BucketError::Sqlx(err) => err.into(),
        }
    }
}
