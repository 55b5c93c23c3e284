//! HTTP handlers. Each one translates a request into a service call and
//! renders the result as JSON.

pub mod auth_handlers;
pub mod bucket_handlers;
pub mod health_handlers;
pub mod item_handlers;

use axum::Json;
use serde_json::{Value, json};

/// `{"message": text}` body used by every mutating endpoint.
pub(crate) fn message(text: &str) -> Json<Value> {
    Json(json!({ "message": text }))
}
