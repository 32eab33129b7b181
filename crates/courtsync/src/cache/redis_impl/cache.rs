//! Redis cache implementation.
//!
//! Values use native Redis expiry (`SET EX`). Slot keys are also added to a
//! per-club Redis Set so a club's slots can be evicted without SCAN.
//!
//! # Non-Atomicity
//!
//! `set` and `delete_pattern` issue several commands. A crash in between can
//! leave a tracking set pointing at keys that no longer exist; deleting those
//! later is a no-op, so the worst case is a stale tracking entry, never a
//! stale value.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use courtsync_core::cache::{
    club_tracking_key, extract_club_id_from_key, extract_club_id_from_pattern, is_slots_key,
    pattern_matches, Cache, Result,
};

use super::error::map_redis_error;

/// Redis cache backend using a connection manager for reconnects.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis at `url` (e.g., "redis://localhost:6379").
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

/// Redis expiry has second granularity; partial seconds round up.
fn expiry_seconds(ttl: Duration) -> u64 {
    ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0)
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let seconds = match ttl {
            // Expired on arrival, like the memory backend: only the old value goes
            Some(d) if d.is_zero() => return self.delete(key).await,
            Some(d) => Some(expiry_seconds(d)),
            None => None,
        };
        let mut conn = self.conn.clone();

        match seconds {
            Some(seconds) => {
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        if is_slots_key(key) {
            if let Some(club_id) = extract_club_id_from_key(key) {
                let tracking_key = club_tracking_key(club_id);
                conn.sadd::<_, _, ()>(&tracking_key, key)
                    .await
                    .map_err(map_redis_error)?;
                // The set never needs to outlive the newest slot key it tracks
                if let Some(seconds) = seconds {
                    let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);
                    conn.expire::<_, ()>(&tracking_key, seconds)
                        .await
                        .map_err(map_redis_error)?;
                }
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(key).await.map_err(map_redis_error)?;

        if is_slots_key(key) {
            if let Some(club_id) = extract_club_id_from_key(key) {
                conn.srem::<_, _, ()>(club_tracking_key(club_id), key)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        // Only club-scoped keys are tracked
        let Some(club_id) = extract_club_id_from_pattern(pattern) else {
            tracing::warn!(pattern, "Ignoring delete_pattern not scoped to a club");
            return Ok(());
        };

        let mut conn = self.conn.clone();
        let tracking_key = club_tracking_key(club_id);

        let tracked_keys: Vec<String> = conn
            .smembers(&tracking_key)
            .await
            .map_err(map_redis_error)?;

        let keys_to_delete: Vec<&String> = tracked_keys
            .iter()
            .filter(|k| pattern_matches(pattern, k))
            .collect();

        if !keys_to_delete.is_empty() {
            conn.del::<_, ()>(&keys_to_delete)
                .await
                .map_err(map_redis_error)?;
            conn.srem::<_, _, ()>(&tracking_key, &keys_to_delete)
                .await
                .map_err(map_redis_error)?;
        }

        Ok(())
    }
}
