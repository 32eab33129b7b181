//! In-memory cache implementation with LRU eviction.
//!
//! Mirrors the Redis backend:
//! - Expired entries read as misses and are removed on that read
//! - Slot keys are tracked per club so a club's slots can be evicted without
//!   walking the whole store
//!
//! Expiry uses `tokio::time::Instant`, so tests drive it with a paused clock.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;
use tokio::time::Instant;

use courtsync_core::availability::ClubId;
use courtsync_core::cache::{
    extract_club_id_from_key, extract_club_id_from_pattern, is_slots_key, pattern_matches, Cache,
    Result,
};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    /// An entry is dead from the instant its TTL has fully elapsed.
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() >= exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Uses `Arc<RwLock<LruCache>>` for concurrent access from in-flight requests.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    /// club_id -> slot keys cached for that club.
    tracking: Arc<RwLock<HashMap<ClubId, HashSet<String>>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache holding at most `max_entries` values.
    ///
    /// A `max_entries` of 0 is treated as 1.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            tracking: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

/// Removes `key` from its club's tracked slot keys.
fn untrack(tracking: &mut HashMap<ClubId, HashSet<String>>, key: &str) {
    if !is_slots_key(key) {
        return;
    }
    let Some(club_id) = extract_club_id_from_key(key) else {
        return;
    };
    if let Some(keys) = tracking.get_mut(&club_id) {
        keys.remove(key);
        if keys.is_empty() {
            tracking.remove(&club_id);
        }
    }
}

// Lock order is always store, then tracking. Tracking changes happen while the
// store lock is held so both maps move together.
#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.write().await;
        match store.get(key) {
            None => return Ok(None),
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
            Some(_) => {}
        }

        // Expired: drop it now rather than waiting for LRU pressure
        store.pop(key);
        untrack(&mut *self.tracking.write().await, key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.write().await;
        let evicted = store.push(key.to_string(), CacheEntry::new(value.to_vec(), ttl));

        let mut tracking = self.tracking.write().await;
        if let Some((evicted_key, _)) = evicted {
            if evicted_key != key {
                untrack(&mut tracking, &evicted_key);
            }
        }
        if is_slots_key(key) {
            if let Some(club_id) = extract_club_id_from_key(key) {
                tracking
                    .entry(club_id)
                    .or_default()
                    .insert(key.to_string());
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut store = self.store.write().await;
        store.pop(key);
        untrack(&mut *self.tracking.write().await, key);
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        let mut store = self.store.write().await;

        let Some(club_id) = extract_club_id_from_pattern(pattern) else {
            // Not scoped to a club - walk the whole store
            let keys_to_delete: Vec<String> = store
                .iter()
                .filter(|(key, _)| pattern_matches(pattern, key))
                .map(|(key, _)| key.clone())
                .collect();
            let mut tracking = self.tracking.write().await;
            for key in keys_to_delete {
                store.pop(&key);
                untrack(&mut tracking, &key);
            }
            return Ok(());
        };

        let mut tracking = self.tracking.write().await;
        let Some(keys) = tracking.get_mut(&club_id) else {
            return Ok(());
        };
        let matching: Vec<String> = keys
            .iter()
            .filter(|k| pattern_matches(pattern, k))
            .cloned()
            .collect();
        for key in &matching {
            keys.remove(key);
            store.pop(key);
        }
        if keys.is_empty() {
            tracking.remove(&club_id);
        }

        Ok(())
    }
}
