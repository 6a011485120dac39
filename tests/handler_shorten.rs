mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;
use url_shortener::api::handlers::shorten_handler;

fn app(state: url_shortener::AppState) -> TestServer {
    let app = Router::new()
        .route("/shorten", post(shorten_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_shorten_success(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = app(state);

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    let code = json["shortCode"].as_str().unwrap();

    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(json["url"], "https://example.com");
    assert_eq!(
        json["shortUrl"],
        format!("{}/{}", common::TEST_BASE_URL, code)
    );
    assert!(json["id"].is_i64());
    assert!(json["createdAt"].is_string());
    assert_eq!(json["createdAt"], json["updatedAt"]);

    assert_eq!(common::access_count(&pool, code).await, Some(0));
}

#[sqlx::test]
async fn test_shorten_same_url_twice_gives_distinct_codes(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = app(state);

    let first = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json::<serde_json::Value>();
    let second = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json::<serde_json::Value>();

    assert_ne!(first["shortCode"], second["shortCode"]);
    assert_ne!(first["id"], second["id"]);
    assert_eq!(common::count_urls(&pool).await, 2);
}

#[sqlx::test]
async fn test_shorten_short_url_from_host_header(pool: PgPool) {
    let (state, _rx) = common::create_host_based_state(pool);
    let server = app(state);

    let response = server
        .post("/shorten")
        .add_header("Host", "localhost:3000")
        .json(&json!({ "url": "https://example.com/page" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    let code = json["shortCode"].as_str().unwrap();
    assert_eq!(json["shortUrl"], format!("http://localhost:3000/{}", code));
}

#[sqlx::test]
async fn test_shorten_missing_url(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = app(state);

    for body in [json!({}), json!({ "url": null }), json!({ "url": "" })] {
        let response = server.post("/shorten").json(&body).await;

        response.assert_status_bad_request();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"]["code"], "validation_error");
        assert_eq!(json["error"]["message"], "URL is required");
    }

    assert_eq!(common::count_urls(&pool).await, 0);
}

#[sqlx::test]
async fn test_shorten_invalid_url(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = app(state);

    for url in ["not a url", "/relative/path", "javascript:alert(1)"] {
        let response = server.post("/shorten").json(&json!({ "url": url })).await;

        response.assert_status_bad_request();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"]["message"], "Invalid URL format");
    }

    assert_eq!(common::count_urls(&pool).await, 0);
}

#[sqlx::test]
async fn test_shorten_non_string_url(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = app(state);

    let response = server.post("/shorten").json(&json!({ "url": 42 })).await;

    response.assert_status_bad_request();
    assert_eq!(common::count_urls(&pool).await, 0);
}

#[sqlx::test]
async fn test_shorten_malformed_json(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = app(state);

    let response = server
        .post("/shorten")
        .bytes("{\"url\": ".into())
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}
