use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use solarconnect::db;

/// Fresh in-memory database per test. One connection so every query sees
/// the same memory store.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    db::create_schema(&pool).await.expect("schema");
    pool
}
