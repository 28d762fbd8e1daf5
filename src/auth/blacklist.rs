use std::time::Duration;

use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::SqlitePool;

use crate::error::ApiError;
use crate::store::tokens;

/// Known-revoked refresh jtis. Safe to cache: once blacklisted, a token is
/// permanently unusable, so a cached hit can never go stale.
static REVOKED_CACHE: Lazy<Cache<String, ()>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(100_000)
        .time_to_live(Duration::from_secs(7 * 86400)) // refresh-token lifetime
        .build()
});

pub async fn mark_revoked(jti: &str) {
    REVOKED_CACHE.insert(jti.to_owned(), ()).await;
}

/// Cache first, store fallback; positive store answers backfill the cache.
pub async fn is_revoked(pool: &SqlitePool, jti: &str) -> Result<bool, ApiError> {
    if REVOKED_CACHE.get(jti).await.is_some() {
        return Ok(true);
    }

    let revoked = tokens::is_revoked(pool, jti).await?;
    if revoked {
        REVOKED_CACHE.insert(jti.to_owned(), ()).await;
    }

    Ok(revoked)
}
