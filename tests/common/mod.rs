// Not every helper is used by every test binary.
#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use base64::{Engine as _, engine::general_purpose};
use bucketlist_api::{
    db, routes::routes::routes, services::token_service::TokenService, state::AppState,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const SECRET: &str = "test-signing-secret";

pub struct TestApp {
    pub router: Router,
    pub tokens: TokenService,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_tokens(TokenService::new(SECRET, &[], chrono::Duration::minutes(30))).await
    }

    pub async fn with_tokens(tokens: TokenService) -> Self {
        let pool = db::connect("sqlite::memory:", 1)
            .await
            .expect("failed to open in-memory database");
        db::run_migrations(&pool)
            .await
            .expect("failed to apply schema");
        let state = AppState::new(Arc::new(pool), tokens.clone());
        Self {
            router: routes(state),
            tokens,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-access-token", token);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).expect("failed to build request"))
            .await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router failed");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn register(&self, username: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/auth/register",
            None,
            Some(serde_json::json!({ "username": username, "password": password })),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        let encoded = general_purpose::STANDARD.encode(format!("{username}:{password}"));
        let request = Request::builder()
            .method(Method::GET)
            .uri("/auth/login")
            .header(header::AUTHORIZATION, format!("Basic {encoded}"))
            .body(Body::empty())
            .expect("failed to build request");
        self.send(request).await
    }

    /// Register `username` and return a fresh access token for it.
    pub async fn signed_in(&self, username: &str) -> String {
        let password = format!("{username}-password");
        assert_eq!(
            self.register(username, &password).await.status,
            StatusCode::CREATED
        );
        let response = self.login(username, &password).await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["token"]
            .as_str()
            .expect("login returned no token")
            .to_string()
    }

    /// Create a bucket and return its id as listed back.
    pub async fn create_bucket(&self, token: &str, name: &str) -> String {
        let created = self
            .request(Method::POST, &format!("/bucketlists/{name}"), Some(token), None)
            .await;
        assert_eq!(created.status, StatusCode::CREATED);

        let listed = self
            .request(Method::GET, "/bucketlists", Some(token), None)
            .await;
        listed.body["Buckets"]
            .as_array()
            .expect("Buckets should be an array")
            .iter()
            .rev()
            .find(|b| b["Bucket Name"] == name)
            .and_then(|b| b["Bucket ID"].as_str())
            .expect("created bucket not listed")
            .to_string()
    }
}
