mod common;

use axum::{
    body::Body,
    http::{HeaderValue, Method, Request, StatusCode, header},
};
use bucketlist_api::services::token_service::TokenService;
use chrono::{Duration, Utc};
use common::{SECRET, TestApp};
use serde_json::json;

#[tokio::test]
async fn register_then_login_yields_token() {
    let app = TestApp::new().await;

    let registered = app.register("alice", "wonderland").await;
    assert_eq!(registered.status, StatusCode::CREATED);
    assert_eq!(registered.body["message"], "New user created!");

    let login = app.login("alice", "wonderland").await;
    assert_eq!(login.status, StatusCode::OK);
    let token = login.body["token"].as_str().unwrap();
    assert_eq!(app.tokens.verify(token).unwrap().username, "alice");
}

#[tokio::test]
async fn wrong_password_is_challenged() {
    let app = TestApp::new().await;
    app.register("alice", "wonderland").await;

    for response in [
        app.login("alice", "looking-glass").await,
        app.login("mallory", "wonderland").await,
    ] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers.get(header::WWW_AUTHENTICATE).unwrap(),
            r#"Basic realm="Login required!""#
        );
        assert!(response.body.get("token").is_none());
    }
}

#[tokio::test]
async fn login_without_credentials_is_challenged() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/auth/login", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.headers.contains_key(header::WWW_AUTHENTICATE));
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = TestApp::new().await;
    assert_eq!(app.register("alice", "one").await.status, StatusCode::CREATED);

    let again = app.register("alice", "two").await;
    assert_eq!(again.status, StatusCode::CONFLICT);

    // the original password still works
    assert_eq!(app.login("alice", "one").await.status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_register_body_is_bad_request() {
    let app = TestApp::new().await;

    let missing_field = app
        .request(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "username": "alice" })),
        )
        .await;
    assert_eq!(missing_field.status, StatusCode::BAD_REQUEST);
    assert!(missing_field.body["message"].is_string());

    let not_json = Request::builder()
        .method(Method::POST)
        .uri("/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    assert_eq!(app.send(not_json).await.status, StatusCode::BAD_REQUEST);

    let blank = app.register("", "pw").await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn registered_username_is_the_login_username() {
    let app = TestApp::new().await;

    let padded = app.register(" alice ", "pw").await;
    assert_eq!(padded.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.login("alice", "pw").await.status, StatusCode::UNAUTHORIZED);

    let with_colon = app.register("al:ice", "pw").await;
    assert_eq!(with_colon.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.register("alice smith", "pw").await.status, StatusCode::CREATED);
    assert_eq!(app.login("alice smith", "pw").await.status, StatusCode::OK);
}

#[tokio::test]
async fn non_ascii_token_header_is_invalid_not_missing() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .method(Method::GET)
        .uri("/bucketlists")
        .header("x-access-token", HeaderValue::from_bytes(b"tok\xe9n").unwrap())
        .body(Body::empty())
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Token is invalid!");
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = TestApp::new().await;

    let missing = app.request(Method::GET, "/bucketlists", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["message"], "Token is missing!");

    let garbage = app
        .request(Method::GET, "/bucketlists", Some("not-a-token"), None)
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.body["message"], "Token is invalid!");
}

#[tokio::test]
async fn token_expires_after_thirty_minutes() {
    let app = TestApp::new().await;
    app.signed_in("alice").await;

    let almost_expired = app
        .tokens
        .issue_at("alice", Utc::now() - Duration::minutes(29))
        .unwrap();
    let ok = app
        .request(Method::GET, "/bucketlists", Some(&almost_expired), None)
        .await;
    assert_eq!(ok.status, StatusCode::OK);

    let expired = app
        .tokens
        .issue_at("alice", Utc::now() - Duration::minutes(31))
        .unwrap();
    let rejected = app
        .request(Method::GET, "/bucketlists", Some(&expired), None)
        .await;
    assert_eq!(rejected.status, StatusCode::UNAUTHORIZED);
    assert_eq!(rejected.body["message"], "Token has expired!");
}

#[tokio::test]
async fn token_signed_with_unknown_secret_is_rejected() {
    let app = TestApp::new().await;
    app.signed_in("alice").await;

    let forged = TokenService::new("attacker-secret", &[], Duration::minutes(30))
        .issue("alice")
        .unwrap();
    let response = app
        .request(Method::GET, "/bucketlists", Some(&forged), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Token signature is invalid!");
}

#[tokio::test]
async fn token_from_before_rotation_is_still_accepted() {
    let before = TokenService::new("retired-secret", &[], Duration::minutes(30));
    let after = TokenService::new(
        SECRET,
        &["retired-secret".to_string()],
        Duration::minutes(30),
    );
    let app = TestApp::with_tokens(after).await;
    app.signed_in("alice").await;

    let old_token = before.issue("alice").unwrap();
    let response = app
        .request(Method::GET, "/bucketlists", Some(&old_token), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn token_for_unknown_user_is_rejected() {
    let app = TestApp::new().await;
    let token = app.tokens.issue("ghost").unwrap();

    let response = app
        .request(Method::GET, "/bucketlists", Some(&token), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_endpoints_are_public() {
    let app = TestApp::new().await;

    let live = app.request(Method::GET, "/healthz", None, None).await;
    assert_eq!(live.status, StatusCode::OK);
    assert_eq!(live.body["status"], "ok");

    let ready = app.request(Method::GET, "/readyz", None, None).await;
    assert_eq!(ready.status, StatusCode::OK);
    assert_eq!(ready.body["checks"]["sqlite"]["ok"], true);
}
