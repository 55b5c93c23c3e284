//! src/services/bucket_service.rs
//!
//! BucketService — per-owner CRUD over buckets and their items, backed by
//! SQLite. Every lookup is scoped to the requesting user: a bucket owned by
//! somebody else is reported exactly like a missing one.

use crate::models::{
    bucket::Bucket,
    item::{DEFAULT_ITEM_STATUS, Item},
};
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BucketError {
    #[error("bucket `{0}` not found")]
    BucketNotFound(Uuid),
    #[error("item `{item}` not found in bucket `{bucket}`")]
    ItemNotFound { bucket: Uuid, item: Uuid },
    #[error("{field} must not be empty")]
    InvalidName { field: &'static str },
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type BucketResult<T> = Result<T, BucketError>;

/// BucketService provides the bucket list operations:
/// - create / list / get / rename / delete buckets of one owner
/// - add / list / get / update / delete items inside an owned bucket
#[derive(Clone)]
pub struct BucketService {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,
}

const NAME_MAX_LEN: usize = 255;

impl BucketService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    fn ensure_name_valid(field: &'static str, value: &str) -> BucketResult<()> {
        if value.trim().is_empty() || value.len() > NAME_MAX_LEN {
            return Err(BucketError::InvalidName { field });
        }
        Ok(())
    }

    /// Fetch a bucket owned by `owner`.
    ///
    /// Returns BucketNotFound if missing or owned by someone else.
    async fn fetch_bucket(&self, owner: Uuid, id: Uuid) -> BucketResult<Bucket> {
        sqlx::query_as::<_, Bucket>(
            "SELECT id, name, user_id, created_at FROM buckets WHERE id = ? AND user_id = ?",
        )
        .bind(id)
        .bind(owner)
        .fetch_one(&*self.db)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => BucketError::BucketNotFound(id),
            other => BucketError::Sqlx(other),
        })
    }

    /// Create a bucket owned by `owner`. Duplicate names are allowed.
    pub async fn create_bucket(&self, owner: Uuid, name: &str) -> BucketResult<Bucket> {
        Self::ensure_name_valid("bucket name", name)?;

        let bucket = Bucket {
            id: Uuid::new_v4(),
            name: name.to_string(),
            user_id: owner,
            created_at: Utc::now(),
        };

        sqlx::query("INSERT INTO buckets (id, name, user_id, created_at) VALUES (?, ?, ?, ?)")
            .bind(bucket.id)
            .bind(&bucket.name)
            .bind(bucket.user_id)
            .bind(bucket.created_at)
            .execute(&*self.db)
            .await?;

        debug!(bucket_id = %bucket.id, "created bucket {}", bucket.name);
        Ok(bucket)
    }

    /// All buckets of `owner`, oldest first.
    pub async fn list_buckets(&self, owner: Uuid) -> BucketResult<Vec<Bucket>> {
        let buckets = sqlx::query_as::<_, Bucket>(
            "SELECT id, name, user_id, created_at FROM buckets
             WHERE user_id = ? ORDER BY created_at, rowid",
        )
        .bind(owner)
        .fetch_all(&*self.db)
        .await?;
        Ok(buckets)
    }

    pub async fn get_bucket(&self, owner: Uuid, id: Uuid) -> BucketResult<Bucket> {
        self.fetch_bucket(owner, id).await
    }

    pub async fn rename_bucket(&self, owner: Uuid, id: Uuid, new_name: &str) -> BucketResult<Bucket> {
        Self::ensure_name_valid("newname", new_name)?;

        let result = sqlx::query("UPDATE buckets SET name = ? WHERE id = ? AND user_id = ?")
            .bind(new_name)
            .bind(id)
            .bind(owner)
            .execute(&*self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BucketError::BucketNotFound(id));
        }

        self.fetch_bucket(owner, id).await
    }

    /// Delete a bucket; its items go with it (ON DELETE CASCADE).
    pub async fn delete_bucket(&self, owner: Uuid, id: Uuid) -> BucketResult<()> {
        let result = sqlx::query("DELETE FROM buckets WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(owner)
            .execute(&*self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BucketError::BucketNotFound(id));
        }

        debug!(bucket_id = %id, "deleted bucket");
        Ok(())
    }

    /// Fetch an item of an owned bucket.
    ///
    /// The bucket is checked first so a foreign bucket surfaces as
    /// BucketNotFound rather than ItemNotFound.
    async fn fetch_item(&self, owner: Uuid, bucket_id: Uuid, item_id: Uuid) -> BucketResult<Item> {
        self.fetch_bucket(owner, bucket_id).await?;
        sqlx::query_as::<_, Item>(
            "SELECT id, name, status, bucket_id, created_at FROM items
             WHERE id = ? AND bucket_id = ?",
        )
        .bind(item_id)
        .bind(bucket_id)
        .fetch_one(&*self.db)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => BucketError::ItemNotFound {
                bucket: bucket_id,
                item: item_id,
            },
            other => BucketError::Sqlx(other),
        })
    }

    /// Add an item with the default "Not Done" status.
    pub async fn add_item(&self, owner: Uuid, bucket_id: Uuid, name: &str) -> BucketResult<Item> {
        Self::ensure_name_valid("itemname", name)?;
        self.fetch_bucket(owner, bucket_id).await?;

        let item = Item {
            id: Uuid::new_v4(),
            name: name.to_string(),
            status: DEFAULT_ITEM_STATUS.to_string(),
            bucket_id,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO items (id, name, status, bucket_id, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.status)
        .bind(item.bucket_id)
        .bind(item.created_at)
        .execute(&*self.db)
        .await?;

        debug!(item_id = %item.id, bucket_id = %bucket_id, "added item {}", item.name);
        Ok(item)
    }

    pub async fn list_items(&self, owner: Uuid, bucket_id: Uuid) -> BucketResult<Vec<Item>> {
        self.fetch_bucket(owner, bucket_id).await?;
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, name, status, bucket_id, created_at FROM items
             WHERE bucket_id = ? ORDER BY created_at, rowid",
        )
        .bind(bucket_id)
        .fetch_all(&*self.db)
        .await?;
        Ok(items)
    }

    pub async fn get_item(&self, owner: Uuid, bucket_id: Uuid, item_id: Uuid) -> BucketResult<Item> {
        self.fetch_item(owner, bucket_id, item_id).await
    }

    /// Replace both the name and the status of an item.
    pub async fn update_item(
        &self,
        owner: Uuid,
        bucket_id: Uuid,
        item_id: Uuid,
        new_name: &str,
        new_status: &str,
    ) -> BucketResult<Item> {
        Self::ensure_name_valid("newname", new_name)?;
        Self::ensure_name_valid("status", new_status)?;
        let mut item = self.fetch_item(owner, bucket_id, item_id).await?;

        sqlx::query("UPDATE items SET name = ?, status = ? WHERE id = ? AND bucket_id = ?")
            .bind(new_name)
            .bind(new_status)
            .bind(item_id)
            .bind(bucket_id)
            .execute(&*self.db)
            .await?;

        item.name = new_name.to_string();
        item.status = new_status.to_string();
        Ok(item)
    }

    pub async fn delete_item(&self, owner: Uuid, bucket_id: Uuid, item_id: Uuid) -> BucketResult<()> {
        self.fetch_bucket(owner, bucket_id).await?;
        let result = sqlx::query("DELETE FROM items WHERE id = ? AND bucket_id = ?")
            .bind(item_id)
            .bind(bucket_id)
            .execute(&*self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BucketError::ItemNotFound {
                bucket: bucket_id,
                item: item_id,
            });
        }
        Ok(())
    }
}
