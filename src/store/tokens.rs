use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::ApiError;

/// Blacklist the refresh token's jti. Idempotent: returns false when the
/// jti was already on the blacklist.
pub async fn revoke(pool: &SqlitePool, jti: &str) -> Result<bool, ApiError> {
    let result = sqlx::query("INSERT OR IGNORE INTO revoked_tokens (jti, revoked_at) VALUES (?, ?)")
        .bind(jti)
        .bind(Utc::now())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn is_revoked(pool: &SqlitePool, jti: &str) -> Result<bool, ApiError> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE jti = ?)")
        .bind(jti)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
}
