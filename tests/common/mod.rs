#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use url_shortener::application::services::ShortenerService;
use url_shortener::domain::access_event::{AccessEvent, AccessTracker};
use url_shortener::domain::access_worker::run_access_worker;
use url_shortener::infrastructure::persistence::PgUrlRepository;
use url_shortener::state::AppState;

pub const TEST_BASE_URL: &str = "http://sho.rt";

pub async fn create_test_url(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO urls (original_url, short_code) VALUES ($1, $2) RETURNING id")
        .bind(url)
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn set_access_count(pool: &PgPool, code: &str, count: i64) {
    sqlx::query("UPDATE urls SET access_count = $1 WHERE short_code = $2")
        .bind(count)
        .bind(code)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn access_count(pool: &PgPool, code: &str) -> Option<i64> {
    sqlx::query_scalar("SELECT access_count FROM urls WHERE short_code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await
        .unwrap()
}

pub async fn count_urls(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Polls until the stored counter reaches `expected` or two seconds pass.
pub async fn wait_for_access_count(pool: &PgPool, code: &str, expected: i64) -> i64 {
    let mut current = access_count(pool, code).await.unwrap_or(-1);

    for _ in 0..200 {
        if current >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
        current = access_count(pool, code).await.unwrap_or(-1);
    }

    current
}

fn build_state(pool: PgPool, base_url: Option<&str>) -> (AppState, mpsc::Receiver<AccessEvent>) {
    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    let (tracker, rx) = AccessTracker::channel(100);

    let shortener = Arc::new(ShortenerService::new(repository, tracker));
    let state = AppState::new(shortener, base_url.map(str::to_string));

    (state, rx)
}

/// State whose access events are left in the returned receiver.
pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<AccessEvent>) {
    build_state(pool, Some(TEST_BASE_URL))
}

/// State that derives short URLs from the `Host` header.
pub fn create_host_based_state(pool: PgPool) -> (AppState, mpsc::Receiver<AccessEvent>) {
    build_state(pool, None)
}

/// State with a live access worker applying increments to the database.
pub fn create_counting_state(pool: PgPool) -> (AppState, JoinHandle<()>) {
    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));
    let (state, rx) = build_state(pool, Some(TEST_BASE_URL));
    let worker = tokio::spawn(run_access_worker(rx, repository));

    (state, worker)
}
