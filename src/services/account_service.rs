//! AccountService — registration and credential checks for users.
//!
//! Passwords are stored as salted argon2id PHC strings. Hashing and
//! verification are CPU bound, so both run on the blocking pool.

use crate::models::user::User;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::Utc;
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

const USERNAME_MAX_LEN: usize = 64;

/// Verified against when the username is unknown.
static DUMMY_HASH: Lazy<String> = Lazy::new(|| {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(b"not-a-real-password", &salt)
        .map(|hash| hash.to_string())
        .unwrap_or_default()
});

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("username `{0}` is already taken")]
    UsernameTaken(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    InvalidInput(String),
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type AccountResult<T> = Result<T, AccountError>;

#[derive(Clone)]
pub struct AccountService {
    pub db: Arc<SqlitePool>,
}

impl AccountService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Create a new user with a freshly salted password hash.
    ///
    /// Returns UsernameTaken when the unique constraint trips.
    pub async fn register(&self, username: &str, password: &str) -> AccountResult<User> {
        if username.trim().is_empty() {
            return Err(AccountError::InvalidInput("username must not be empty".into()));
        }
        // stored exactly as sent, so it must survive a Basic auth round trip
        if username.trim() != username {
            return Err(AccountError::InvalidInput(
                "username must not start or end with whitespace".into(),
            ));
        }
        if username.contains(':') {
            return Err(AccountError::InvalidInput("username must not contain `:`".into()));
        }
        if username.len() > USERNAME_MAX_LEN {
            return Err(AccountError::InvalidInput(format!(
                "username must be at most {} characters",
                USERNAME_MAX_LEN
            )));
        }
        if password.is_empty() {
            return Err(AccountError::InvalidInput("password must not be empty".into()));
        }

        let password_hash = hash_password(password.to_string()).await?;
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash,
            created_at: Utc::now(),
        };

        match sqlx::query(
            "INSERT INTO users (id, username, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&*self.db)
        .await
        {
            Ok(_) => {
                info!(user_id = %user.id, "registered user {}", user.username);
                Ok(user)
            }
            Err(err) if is_unique_violation(&err) => {
                Err(AccountError::UsernameTaken(username.to_string()))
            }
            Err(err) => Err(AccountError::Sqlx(err)),
        }
    }

    /// Look a user up by name. `None` when no such user exists.
    pub async fn find_by_username(&self, username: &str) -> AccountResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&*self.db)
        .await?;
        Ok(user)
    }

    /// Check a username/password pair.
    ///
    /// Unknown users and wrong passwords both yield InvalidCredentials.
    pub async fn authenticate(&self, username: &str, password: &str) -> AccountResult<User> {
        let Some(user) = self.find_by_username(username).await? else {
            debug!("login attempt for unknown user {}", username);
            // same argon2 cost as a wrong password
            let _ = verify_password(password.to_string(), DUMMY_HASH.clone()).await;
            return Err(AccountError::InvalidCredentials);
        };

        if verify_password(password.to_string(), user.password_hash.clone()).await? {
            Ok(user)
        } else {
            debug!("wrong password for user {}", username);
            Err(AccountError::InvalidCredentials)
        }
    }
}

async fn hash_password(password: String) -> AccountResult<String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| AccountError::Hashing(err.to_string()))
    })
    .await
    .map_err(|err| AccountError::Hashing(err.to_string()))?
}

async fn verify_password(password: String, stored: String) -> AccountResult<bool> {
    tokio::task::spawn_blocking(move || {
        let parsed =
            PasswordHash::new(&stored).map_err(|err| AccountError::Hashing(err.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .map_err(|err| AccountError::Hashing(err.to_string()))?
}

/// Return true if SQLx error indicates a unique constraint violation.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.message().to_ascii_lowercase().contains("unique")
    )
}
