//! HTTP handlers for items inside a bucket.

use super::message;
use crate::{
    errors::AppError,
    extract::{AppJson, AppPath},
    middleware::auth::CurrentUser,
    models::item::Item,
    services::bucket_service::BucketService,
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

/// Body of `POST /bucketlists/{id}/items/`.
#[derive(Debug, Deserialize)]
pub struct AddItemReq {
    pub itemname: String,
}

/// Body of `PUT /bucketlists/{id}/items/{item_id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateItemReq {
    pub newname: String,
    pub status: String,
}

pub async fn add_item(
    State(service): State<BucketService>,
    user: CurrentUser,
    AppPath(bucket_id): AppPath<Uuid>,
    AppJson(payload): AppJson<AddItemReq>,
) -> Result<impl IntoResponse, AppError> {
    service.add_item(user.id, bucket_id, &payload.itemname).await?;
    Ok((StatusCode::CREATED, message("Item added!")))
}

pub async fn list_items(
    State(service): State<BucketService>,
    user: CurrentUser,
    AppPath(bucket_id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let items = service.list_items(user.id, bucket_id).await?;
    Ok(Json(json!({ "Items": items })))
}

pub async fn get_item(
    State(service): State<BucketService>,
    user: CurrentUser,
    AppPath((bucket_id, item_id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<Item>, AppError> {
    Ok(Json(service.get_item(user.id, bucket_id, item_id).await?))
}

/// PUT — replaces both name and status.
pub async fn update_item(
    State(service): State<BucketService>,
    user: CurrentUser,
    AppPath((bucket_id, item_id)): AppPath<(Uuid, Uuid)>,
    AppJson(payload): AppJson<UpdateItemReq>,
) -> Result<impl IntoResponse, AppError> {
    service
        .update_item(user.id, bucket_id, item_id, &payload.newname, &payload.status)
        .await?;
    Ok(message("Item has been updated!"))
}

pub async fn delete_item(
    State(service): State<BucketService>,
    user: CurrentUser,
    AppPath((bucket_id, item_id)): AppPath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    service.delete_item(user.id, bucket_id, item_id).await?;
    Ok(message("Item deleted!"))
}
