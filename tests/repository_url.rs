mod common;

use sqlx::PgPool;
use std::sync::Arc;
use url_shortener::domain::entities::NewUrlRecord;
use url_shortener::domain::repositories::UrlRepository;
use url_shortener::error::is_short_code_conflict;
use url_shortener::infrastructure::persistence::PgUrlRepository;
use url_shortener::AppError;

fn repository(pool: PgPool) -> PgUrlRepository {
    PgUrlRepository::new(Arc::new(pool))
}

fn new_record(code: &str, url: &str) -> NewUrlRecord {
    NewUrlRecord {
        original_url: url.to_string(),
        short_code: code.to_string(),
    }
}

#[sqlx::test]
async fn test_insert_and_find(pool: PgPool) {
    let repo = repository(pool);

    let record = repo
        .insert(new_record("abc123", "https://example.com"))
        .await
        .unwrap();

    assert!(record.id > 0);
    assert_eq!(record.short_code, "abc123");
    assert_eq!(record.original_url, "https://example.com");
    assert_eq!(record.access_count, 0);
    assert_eq!(record.created_at, record.updated_at);
    assert!(!record.was_updated());

    let found = repo.find_by_code("abc123").await.unwrap().unwrap();
    assert_eq!(found.id, record.id);
    assert_eq!(found.original_url, record.original_url);
}

#[sqlx::test]
async fn test_find_is_case_sensitive(pool: PgPool) {
    let repo = repository(pool);

    repo.insert(new_record("AbCdEf", "https://example.com"))
        .await
        .unwrap();

    assert!(repo.find_by_code("abcdef").await.unwrap().is_none());
    assert!(repo.find_by_code("AbCdEf").await.unwrap().is_some());
}

#[sqlx::test]
async fn test_insert_duplicate_code(pool: PgPool) {
    let repo = repository(pool.clone());

    repo.insert(new_record("dup001", "https://example.com/a"))
        .await
        .unwrap();

    let err = repo
        .insert(new_record("dup001", "https://example.com/b"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
    assert!(is_short_code_conflict(&err));

    let kept = repo.find_by_code("dup001").await.unwrap().unwrap();
    assert_eq!(kept.original_url, "https://example.com/a");
    assert_eq!(common::count_urls(&pool).await, 1);
}

#[sqlx::test]
async fn test_same_url_under_two_codes(pool: PgPool) {
    let repo = repository(pool);

    let a = repo
        .insert(new_record("same01", "https://example.com"))
        .await
        .unwrap();
    let b = repo
        .insert(new_record("same02", "https://example.com"))
        .await
        .unwrap();

    assert_ne!(a.id, b.id);
}

#[sqlx::test]
async fn test_update_url(pool: PgPool) {
    let repo = repository(pool.clone());

    let created = repo
        .insert(new_record("upd001", "https://example.com/old"))
        .await
        .unwrap();
    common::set_access_count(&pool, "upd001", 7).await;

    let updated = repo
        .update_url("upd001", "https://example.com/new")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.original_url, "https://example.com/new");
    assert_eq!(updated.access_count, 7);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
    assert!(updated.was_updated());
}

#[sqlx::test]
async fn test_update_missing_code(pool: PgPool) {
    let repo = repository(pool);

    let result = repo
        .update_url("nope00", "https://example.com")
        .await
        .unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
async fn test_increment_access_count(pool: PgPool) {
    let repo = repository(pool.clone());

    repo.insert(new_record("inc001", "https://example.com"))
        .await
        .unwrap();

    assert!(repo.increment_access_count("inc001").await.unwrap());
    assert!(repo.increment_access_count("inc001").await.unwrap());

    assert_eq!(common::access_count(&pool, "inc001").await, Some(2));
    assert!(!repo.increment_access_count("nope00").await.unwrap());
}

#[sqlx::test]
async fn test_increment_does_not_touch_updated_at(pool: PgPool) {
    let repo = repository(pool);

    let created = repo
        .insert(new_record("inc002", "https://example.com"))
        .await
        .unwrap();

    repo.increment_access_count("inc002").await.unwrap();

    let found = repo.find_by_code("inc002").await.unwrap().unwrap();
    assert_eq!(found.updated_at, created.updated_at);
}

#[sqlx::test]
async fn test_concurrent_increments_are_not_lost(pool: PgPool) {
    let repo = Arc::new(repository(pool.clone()));

    repo.insert(new_record("race01", "https://example.com"))
        .await
        .unwrap();

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..50 {
        let repo = repo.clone();
        tasks.spawn(async move { repo.increment_access_count("race01").await.unwrap() });
    }

    while let Some(result) = tasks.join_next().await {
        assert!(result.unwrap());
    }

    assert_eq!(common::access_count(&pool, "race01").await, Some(50));
}

#[sqlx::test]
async fn test_delete_by_code(pool: PgPool) {
    let repo = repository(pool);

    repo.insert(new_record("del001", "https://example.com"))
        .await
        .unwrap();

    assert!(repo.delete_by_code("del001").await.unwrap());
    assert!(repo.find_by_code("del001").await.unwrap().is_none());
    assert!(!repo.delete_by_code("del001").await.unwrap());
}

#[sqlx::test]
async fn test_code_reusable_after_delete(pool: PgPool) {
    let repo = repository(pool);

    let first = repo
        .insert(new_record("reuse1", "https://example.com/a"))
        .await
        .unwrap();
    repo.delete_by_code("reuse1").await.unwrap();

    let second = repo
        .insert(new_record("reuse1", "https://example.com/b"))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(second.access_count, 0);
}

#[sqlx::test]
async fn test_count_and_total_accesses(pool: PgPool) {
    let repo = repository(pool.clone());

    assert_eq!(repo.count().await.unwrap(), 0);
    assert_eq!(repo.total_accesses().await.unwrap(), 0);

    repo.insert(new_record("tot001", "https://example.com/1"))
        .await
        .unwrap();
    repo.insert(new_record("tot002", "https://example.com/2"))
        .await
        .unwrap();
    common::set_access_count(&pool, "tot001", 3).await;
    common::set_access_count(&pool, "tot002", 4).await;

    assert_eq!(repo.count().await.unwrap(), 2);
    assert_eq!(repo.total_accesses().await.unwrap(), 7);
}
