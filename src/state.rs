//! Shared application state handed to the router.

use crate::services::{
    account_service::AccountService, bucket_service::BucketService, token_service::TokenService,
};
use axum::extract::FromRef;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Everything handlers need. Each field is cheap to clone and can be
/// extracted on its own through `State<T>`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: Arc<SqlitePool>,
    pub accounts: AccountService,
    pub buckets: BucketService,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(db: Arc<SqlitePool>, tokens: TokenService) -> Self {
        Self {
            accounts: AccountService::new(db.clone()),
            buckets: BucketService::new(db.clone()),
            tokens,
            db,
        }
    }
}
