//! Router-level tests that exercise the HTTP surface against an
//! in-memory database. No ffmpeg binary is needed: every request here
//! is rejected or served before a subprocess would run.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use reel_api::{create_router, ApiConfig, AppState};
use reel_media::FfmpegEngine;
use reel_pipeline::ReelPipeline;
use reel_store::ReelStore;

fn test_app(tmp: &TempDir) -> Router {
    let config = ApiConfig {
        staging_dir: tmp.path().join("staging"),
        temp_dir: tmp.path().join("temp"),
        output_dir: tmp.path().join("final"),
        jwt_secret: "test-secret".to_string(),
        ..ApiConfig::default()
    };
    std::fs::create_dir_all(&config.staging_dir).unwrap();
    std::fs::create_dir_all(&config.temp_dir).unwrap();
    std::fs::create_dir_all(&config.output_dir).unwrap();

    let store = Arc::new(ReelStore::open_in_memory().unwrap());
    let pipeline = Arc::new(ReelPipeline::new(
        config.pipeline_config(),
        Arc::new(FfmpegEngine::without_timeout()),
        store.clone(),
    ));
    let state = AppState {
        config: Arc::new(config),
        store,
        pipeline,
    };
    create_router(state)
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register_and_login(app: &Router) -> String {
    let resp = app
        .clone()
        .oneshot(json_request(
            "/api/auth/register",
            json!({"name": "Alice", "email": "alice@example.com", "password": "hunter2"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(json_request(
            "/api/auth/login",
            json!({"email": "alice@example.com", "password": "hunter2"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_returns_ok() {
    let tmp = TempDir::new().unwrap();
    let app = test_app(&tmp);

    let resp = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ok");
}

#[tokio::test]
async fn register_reports_each_missing_field() {
    let tmp = TempDir::new().unwrap();
    let app = test_app(&tmp);

    // a present name must not mask a missing email
    let resp = app
        .clone()
        .oneshot(json_request(
            "/api/auth/register",
            json!({"name": "Alice", "password": "hunter2"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().contains("email"));

    let resp = app
        .oneshot(json_request(
            "/api/auth/register",
            json!({"name": "Alice", "email": "a@b.c"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn register_login_round_trip() {
    let tmp = TempDir::new().unwrap();
    let app = test_app(&tmp);

    let token = register_and_login(&app).await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let tmp = TempDir::new().unwrap();
    let app = test_app(&tmp);

    let payload = json!({"name": "Alice", "email": "alice@example.com", "password": "hunter2"});
    let resp = app
        .clone()
        .oneshot(json_request("/api/auth/register", payload.clone()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .oneshot(json_request("/api/auth/register", payload))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let tmp = TempDir::new().unwrap();
    let app = test_app(&tmp);
    register_and_login(&app).await;

    let resp = app
        .oneshot(json_request(
            "/api/auth/login",
            json!({"email": "alice@example.com", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_reel_requires_a_token() {
    let tmp = TempDir::new().unwrap();
    let app = test_app(&tmp);

    let resp = app
        .oneshot(
            Request::post("/api/reel/create")
                .header(header::CONTENT_TYPE, "multipart/form-data; boundary=X")
                .body(Body::from("--X--\r\n"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_reel_rejects_non_media_upload() {
    let tmp = TempDir::new().unwrap();
    let app = test_app(&tmp);
    let token = register_and_login(&app).await;

    let body = concat!(
        "--BOUNDARY\r\n",
        "Content-Disposition: form-data; name=\"media\"; filename=\"a.txt\"\r\n",
        "Content-Type: text/plain\r\n",
        "\r\n",
        "hello\r\n",
        "--BOUNDARY--\r\n",
    );
    let resp = app
        .oneshot(
            Request::post("/api/reel/create")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(
                    header::CONTENT_TYPE,
                    "multipart/form-data; boundary=BOUNDARY",
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_reel_requires_the_song_part() {
    let tmp = TempDir::new().unwrap();
    let app = test_app(&tmp);
    let token = register_and_login(&app).await;

    let body = concat!(
        "--BOUNDARY\r\n",
        "Content-Disposition: form-data; name=\"media\"; filename=\"a.png\"\r\n",
        "Content-Type: image/png\r\n",
        "\r\n",
        "not-really-a-png\r\n",
        "--BOUNDARY--\r\n",
    );
    let resp = app
        .oneshot(
            Request::post("/api/reel/create")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(
                    header::CONTENT_TYPE,
                    "multipart/form-data; boundary=BOUNDARY",
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().contains("song"));
}

#[tokio::test]
async fn duplicate_media_parts_are_rejected_and_swept() {
    let tmp = TempDir::new().unwrap();
    let app = test_app(&tmp);
    let token = register_and_login(&app).await;

    let body = concat!(
        "--BOUNDARY\r\n",
        "Content-Disposition: form-data; name=\"media\"; filename=\"a.png\"\r\n",
        "Content-Type: image/png\r\n",
        "\r\n",
        "first\r\n",
        "--BOUNDARY\r\n",
        "Content-Disposition: form-data; name=\"media\"; filename=\"b.png\"\r\n",
        "Content-Type: image/png\r\n",
        "\r\n",
        "second\r\n",
        "--BOUNDARY--\r\n",
    );
    let resp = app
        .oneshot(
            Request::post("/api/reel/create")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(
                    header::CONTENT_TYPE,
                    "multipart/form-data; boundary=BOUNDARY",
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let resp_body = body_json(resp).await;
    assert!(resp_body["detail"].as_str().unwrap().contains("duplicate"));

    // The first staged file must not be orphaned in the staging dir.
    let staged: Vec<_> = std::fs::read_dir(tmp.path().join("staging"))
        .unwrap()
        .collect();
    assert!(staged.is_empty());
}

#[tokio::test]
async fn listing_starts_empty() {
    let tmp = TempDir::new().unwrap();
    let app = test_app(&tmp);

    let resp = app
        .oneshot(Request::get("/api/reel/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["reels"].as_array().unwrap().len(), 0);
    assert_eq!(body["current_page"], 1);
    assert_eq!(body["total_pages"], 0);
}
