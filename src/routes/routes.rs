//! Defines the HTTP surface of the bucket list service.
//!
//! ## Structure
//! - **Public endpoints**
//!   - `GET    /healthz`, `GET /readyz` — probes
//!   - `POST   /auth/register` — create an account
//!   - `GET    /auth/login` — Basic credentials in, access token out
//!
//! - **Token-protected endpoints** (`x-access-token` header)
//!   - `GET    /bucketlists` — list own buckets
//!   - `POST   /bucketlists/{name}` — create bucket
//!   - `GET|PUT|DELETE /bucketlists/{id}` — read, rename, delete bucket
//!   - `GET|POST /bucketlists/{id}/items/` — list, add items
//!   - `GET|PUT|DELETE /bucketlists/{id}/items/{item_id}` — single item
//!
//! Item collection routes answer with and without the trailing slash.

use crate::{
    handlers::{
        auth_handlers::{login, register},
        bucket_handlers::{create_bucket, delete_bucket, get_bucket, list_buckets, update_bucket},
        health_handlers::{healthz, readyz},
        item_handlers::{add_item, delete_item, get_item, list_items, update_item},
    },
    middleware::auth::require_token,
    state::AppState,
};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Build the complete router for `state`.
///
/// The token gate is applied with `route_layer` to the bucket list routes
/// only, so unmatched paths still answer 404 rather than 401.
pub fn routes(state: AppState) -> Router {
    let protected = Router::new()
        .route("/bucketlists", get(list_buckets))
        .route(
            "/bucketlists/{id}",
            post(create_bucket)
                .get(get_bucket)
                .put(update_bucket)
                .delete(delete_bucket),
        )
        .route("/bucketlists/{id}/items", get(list_items).post(add_item))
        .route("/bucketlists/{id}/items/", get(list_items).post(add_item))
        .route(
            "/bucketlists/{id}/items/{item_id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_token,
        ));

    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/auth/register", post(register))
        .route("/auth/login", get(login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
