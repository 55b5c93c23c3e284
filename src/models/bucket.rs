//! Represents a bucket — a named list owned by a single user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A bucket list belonging to one user.
///
/// Buckets hold items. Deleting a bucket removes its items as well.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct Bucket {
    /// Unique identifier for this bucket.
    #[serde(rename = "Bucket ID")]
    pub id: Uuid,

    /// Display name. Not unique, even for the same owner.
    #[serde(rename = "Bucket Name")]
    pub name: String,

    /// ID of the user that created (and owns) this bucket.
    #[serde(rename = "User ID")]
    pub user_id: Uuid,

    /// When this bucket was created.
    #[serde(rename = "Created At")]
    pub created_at: DateTime<Utc>,
}
