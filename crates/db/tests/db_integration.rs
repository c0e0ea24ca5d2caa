//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `movienight_test`)
//!   `TEST_DB_PASSWORD` (default: `movienight_test`)
//!   `TEST_DB_NAME` (default: `movienight_test`)

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use movienight_db::repositories::MovieRepository;
use movienight_db::test_utils::{TestDatabase, TestDbConfig};

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_case_insensitive_title_lookup() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    db.cleanup().await.unwrap();
    db.seed_movies(&["The Thing"]).await.unwrap();

    let repo = MovieRepository::new(Arc::new(db.conn));
    let found = repo.find_by_title("the THING").await.unwrap();
    assert_eq!(found.map(|m| m.title), Some("The Thing".to_string()));
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_title_unique_regardless_of_case() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    db.cleanup().await.unwrap();
    db.seed_movies(&["Dune"]).await.unwrap();

    let duplicate = db.seed_movies(&["DUNE"]).await;
    assert!(duplicate.is_err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_concurrent_increments_are_not_lost() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    db.cleanup().await.unwrap();
    db.seed_movies(&["Arrival"]).await.unwrap();

    let repo = MovieRepository::new(Arc::new(db.conn));
    let mut handles = Vec::new();
    for _ in 0..20 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.increment_votes("arrival", 1).await.unwrap()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), 1);
    }

    let movie = repo.get_by_title("Arrival").await.unwrap();
    assert_eq!(movie.votes, 20);
}

#[test]
fn test_config_from_env() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(!config.database.is_empty());
}
