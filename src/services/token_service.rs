//! TokenService — issues and verifies HS256 access tokens.
//!
//! Tokens carry `{ username, exp }`. New tokens are signed with the current
//! secret; verification also accepts retired secrets so that rotating the
//! secret does not log everybody out at once.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token is missing!")]
    Missing,
    #[error("Token is invalid!")]
    Malformed,
    #[error("Token has expired!")]
    Expired,
    #[error("Token signature is invalid!")]
    BadSignature,
    #[error("Token user `{0}` no longer exists")]
    UnknownUser(String),
    #[error("failed to encode token")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub username: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: Arc<EncodingKey>,
    /// Current key first, then retired keys in configured order.
    decoding: Arc<Vec<DecodingKey>>,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, previous_secrets: &[String], ttl: Duration) -> Self {
        let decoding = std::iter::once(secret)
            .chain(previous_secrets.iter().map(String::as_str))
            .map(|s| DecodingKey::from_secret(s.as_bytes()))
            .collect();

        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(decoding),
            ttl,
        }
    }

    /// Issue a token for `username`, valid for the configured lifetime.
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        self.issue_at(username, Utc::now())
    }

    /// Issue a token as if it were minted at `issued_at`.
    pub fn issue_at(&self, username: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            username: username.to_string(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Check signature and expiry, returning the embedded claims.
    ///
    /// Keys are tried in order; only a signature mismatch moves on to the
    /// next key. Expiry is enforced with zero leeway.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        for (index, key) in self.decoding.iter().enumerate() {
            match decode::<Claims>(token, key, &validation) {
                Ok(data) => {
                    if index > 0 {
                        debug!("token accepted with retired key #{}", index);
                    }
                    return Ok(data.claims);
                }
                Err(err) => match err.kind() {
                    ErrorKind::InvalidSignature => continue,
                    ErrorKind::ExpiredSignature => return Err(TokenError::Expired),
                    _ => return Err(TokenError::Malformed),
                },
            }
        }

        Err(TokenError::BadSignature)
    }
}
