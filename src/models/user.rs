//! Represents a registered account.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user. Never serialized: the hash stays server-side.
#[derive(Clone, FromRow, Debug)]
pub struct User {
    pub id: Uuid,

    /// Unique login name, also the `username` claim of issued tokens.
    pub username: String,

    /// Argon2 PHC string (algorithm, params, salt and hash).
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}
