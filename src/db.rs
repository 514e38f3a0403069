use sqlx::{sqlite::{SqlitePoolOptions, SqliteConnectOptions}, SqlitePool};
use std::str::FromStr;

pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_opts)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Idempotent schema setup, run on every boot.
pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS engineer_profiles (
            id TEXT PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            phone TEXT,
            company TEXT,
            service_type TEXT,
            experience TEXT,
            location TEXT,
            specialties TEXT NOT NULL DEFAULT '[]',
            terms_agreed INTEGER NOT NULL DEFAULT 0,
            marketing_opt_in INTEGER NOT NULL DEFAULT 0,
            avatar_url TEXT,
            bio TEXT,
            certifications TEXT NOT NULL DEFAULT '[]',
            hourly_rate REAL,
            rating REAL NOT NULL DEFAULT 0,
            total_projects INTEGER NOT NULL DEFAULT 0,
            availability TEXT NOT NULL DEFAULT 'available'
                CHECK(availability IN ('available', 'busy', 'unavailable')),
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            user_type TEXT NOT NULL
                CHECK(user_type IN ('epc_company', 'engineer', 'tool_provider')),
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            expires_at TEXT,
            FOREIGN KEY(user_id) REFERENCES users(id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
