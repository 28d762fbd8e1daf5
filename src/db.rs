use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

pub async fn init_db(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("Invalid DATABASE_URL")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .expect("Failed to connect to database");

    init_schema(&pool)
        .await
        .expect("Failed to initialize schema");

    pool
}

/// Idempotent schema creation. Uniqueness rules live here as constraints;
/// application-level checks are conveniences only.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id            TEXT PRIMARY KEY,
            email         TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            name          TEXT NOT NULL,
            role          TEXT NOT NULL DEFAULT 'HR Manager',
            phone         TEXT,
            department    TEXT,
            is_active     INTEGER NOT NULL DEFAULT 1,
            joined_at     TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id            TEXT PRIMARY KEY,
            employee_code TEXT NOT NULL UNIQUE,
            full_name     TEXT NOT NULL,
            email         TEXT NOT NULL UNIQUE,
            department    TEXT NOT NULL,
            created_at    TEXT NOT NULL,
            created_by    TEXT REFERENCES users(id) ON DELETE SET NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS attendance_records (
            id          TEXT PRIMARY KEY,
            employee_id TEXT NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
            date        TEXT NOT NULL,
            status      TEXT NOT NULL CHECK (status IN ('present', 'absent')),
            created_at  TEXT NOT NULL,
            marked_by   TEXT REFERENCES users(id) ON DELETE SET NULL,
            UNIQUE (employee_id, date)
        )
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance_records(date)
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS revoked_tokens (
            jti        TEXT PRIMARY KEY,
            revoked_at TEXT NOT NULL
        )
        "#,
    ];

    for stmt in statements {
        sqlx::query(stmt).execute(pool).await?;
    }

    Ok(())
}
