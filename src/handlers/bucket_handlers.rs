//! HTTP handlers for bucket operations. All of them run behind
//! `require_token` and act on the caller's own buckets only.

use super::message;
use crate::{
    errors::AppError,
    extract::{AppJson, AppPath},
    middleware::auth::CurrentUser,
    models::bucket::Bucket,
    services::bucket_service::BucketService,
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

/// Body of `PUT /bucketlists/{id}`.
#[derive(Debug, Deserialize)]
pub struct RenameBucketReq {
    pub newname: String,
}

/// POST `/bucketlists/{name}` — create a bucket named by the path.
pub async fn create_bucket(
    State(service): State<BucketService>,
    user: CurrentUser,
    AppPath(name): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let bucket = service.create_bucket(user.id, &name).await?;
    info!(bucket_id = %bucket.id, "{} created bucket {}", user.username, bucket.name);
    Ok((StatusCode::CREATED, message("Bucket created!")))
}

/// GET `/bucketlists` — every bucket of the caller.
pub async fn list_buckets(
    State(service): State<BucketService>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let buckets = service.list_buckets(user.id).await?;
    Ok(Json(json!({ "Buckets": buckets })))
}

/// GET `/bucketlists/{id}`
pub async fn get_bucket(
    State(service): State<BucketService>,
    user: CurrentUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Bucket>, AppError> {
    Ok(Json(service.get_bucket(user.id, id).await?))
}

/// PUT `/bucketlists/{id}` — rename.
pub async fn update_bucket(
    State(service): State<BucketService>,
    user: CurrentUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<RenameBucketReq>,
) -> Result<impl IntoResponse, AppError> {
    service.rename_bucket(user.id, id, &payload.newname).await?;
    Ok(message("Bucket name has been updated!"))
}

/// DELETE `/bucketlists/{id}` — removes the bucket and its items.
pub async fn delete_bucket(
    State(service): State<BucketService>,
    user: CurrentUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    service.delete_bucket(user.id, id).await?;
    info!(bucket_id = %id, "{} deleted bucket", user.username);
    Ok(message("Bucket list deleted!"))
}
