//! Represents a single entry inside a bucket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status given to every freshly added item.
pub const DEFAULT_ITEM_STATUS: &str = "Not Done";

/// An item within a bucket.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct Item {
    #[serde(rename = "Item ID")]
    pub id: Uuid,

    #[serde(rename = "Item Name")]
    pub name: String,

    /// Free-text completion status, e.g. "Not Done" or "Done".
    #[serde(rename = "Item Status")]
    pub status: String,

    /// Foreign key linking to the parent bucket.
    #[serde(rename = "Bucket ID")]
    pub bucket_id: Uuid,

    #[serde(rename = "Created At")]
    pub created_at: DateTime<Utc>,
}
