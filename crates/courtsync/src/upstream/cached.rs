//! Read-through cache decorator for the upstream client.
//!
//! - **Reads**: check the cache first; on a miss call the upstream, store the
//!   result with the entity TTL, return it
//! - **Failures**: upstream errors are returned and never cached; cache errors
//!   on the read path degrade to an upstream fetch
//! - **Invalidation**: `invalidate_courts` deletes the courts key of a club and
//!   returns any cache error to the caller

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};

use courtsync_core::availability::{Club, ClubId, Court, CourtId, Slot};
use courtsync_core::cache::{
    self, club_slots_pattern, clubs_key, courts_key, from_cache_bytes, slots_key, to_cache_bytes,
    Cache,
};
use courtsync_core::upstream::{self, UpstreamClient, UpstreamInvalidation};

/// Time-to-live of each cached entity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    pub clubs: Duration,
    pub courts: Duration,
    pub slots: Duration,
}

impl Default for CacheTtls {
    /// Courts get the shortest TTL: roster changes are what club updates announce.
    fn default() -> Self {
        Self {
            clubs: Duration::from_secs(300),
            courts: Duration::from_secs(60),
            slots: Duration::from_secs(300),
        }
    }
}

/// What a courts invalidation also evicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlotInvalidation {
    /// Only the courts key. Cached slots of the club stay until their own TTL.
    #[default]
    CourtsOnly,
    /// The courts key and every tracked slot key of the club.
    Cascade,
}

impl FromStr for SlotInvalidation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "courts-only" | "courts_only" => Ok(Self::CourtsOnly),
            "cascade" => Ok(Self::Cascade),
            other => Err(format!("unknown slot invalidation policy: {}", other)),
        }
    }
}

/// Caching decorator over an [`UpstreamClient`].
///
/// # Type Parameters
///
/// * `U` - The underlying transport client
/// * `C` - The cache implementation
pub struct CachedUpstreamClient<U, C>
where
    U: UpstreamClient,
    C: Cache,
{
    upstream: Arc<U>,
    cache: Arc<C>,
    ttls: CacheTtls,
    slot_invalidation: SlotInvalidation,
}

impl<U, C> CachedUpstreamClient<U, C>
where
    U: UpstreamClient,
    C: Cache,
{
    /// Creates a cached client with the courts-only invalidation policy.
    pub fn new(upstream: Arc<U>, cache: Arc<C>, ttls: CacheTtls) -> Self {
        Self {
            upstream,
            cache,
            ttls,
            slot_invalidation: SlotInvalidation::default(),
        }
    }

    pub fn with_slot_invalidation(mut self, policy: SlotInvalidation) -> Self {
        self.slot_invalidation = policy;
        self
    }

    /// Serves `key` from cache, or fetches it and stores it for `ttl`.
    async fn read_through<T, F, Fut>(
        &self,
        key: String,
        ttl: Duration,
        fetch: F,
    ) -> upstream::Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = upstream::Result<Vec<T>>> + Send,
    {
        match self.cache.get(&key).await {
            Ok(Some(bytes)) => match from_cache_bytes::<Vec<T>>(&bytes) {
                Ok(value) => {
                    tracing::trace!(key = %key, "Cache hit");
                    return Ok(value);
                }
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "Cached value undecodable, refetching");
                }
            },
            Ok(None) => tracing::trace!(key = %key, "Cache miss"),
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Cache read failed, fetching from upstream");
            }
        }

        let value = fetch().await?;

        match to_cache_bytes(&value) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(&key, &bytes, Some(ttl)).await {
                    tracing::warn!(key = %key, error = %err, "Failed to cache upstream response");
                } else {
                    tracing::debug!(key = %key, ttl_secs = ttl.as_secs(), "Cached upstream response");
                }
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Failed to serialize upstream response");
            }
        }

        Ok(value)
    }
}

#[async_trait]
impl<U, C> UpstreamClient for CachedUpstreamClient<U, C>
where
    U: UpstreamClient + 'static,
    C: Cache + 'static,
{
    async fn list_clubs(&self, place_id: &str) -> upstream::Result<Vec<Club>> {
        self.read_through(clubs_key(place_id), self.ttls.clubs, || {
            self.upstream.list_clubs(place_id)
        })
        .await
    }

    async fn list_courts(&self, club_id: ClubId) -> upstream::Result<Vec<Court>> {
        self.read_through(courts_key(club_id), self.ttls.courts, || {
            self.upstream.list_courts(club_id)
        })
        .await
    }

    async fn list_slots(
        &self,
        club_id: ClubId,
        court_id: CourtId,
        date: NaiveDate,
    ) -> upstream::Result<Vec<Slot>> {
        self.read_through(
            slots_key(club_id, court_id, date),
            self.ttls.slots,
            || self.upstream.list_slots(club_id, court_id, date),
        )
        .await
    }
}

#[async_trait]
impl<U, C> UpstreamInvalidation for CachedUpstreamClient<U, C>
where
    U: UpstreamClient + 'static,
    C: Cache + 'static,
{
    async fn invalidate_courts(&self, club_id: ClubId) -> cache::Result<()> {
        self.cache.delete(&courts_key(club_id)).await?;

        if self.slot_invalidation == SlotInvalidation::Cascade {
            self.cache.delete_pattern(&club_slots_pattern(club_id)).await?;
        }

        tracing::debug!(
            club_id,
            policy = ?self.slot_invalidation,
            "Invalidated cached courts"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use courtsync_core::availability::Court;
    use courtsync_core::upstream::UpstreamError;

    use crate::cache::MemoryCache;
    use crate::test_support::{march_first, FailingCache, FakeUpstream};

    fn cached(
        upstream: &Arc<FakeUpstream>,
        cache: &Arc<MemoryCache>,
    ) -> CachedUpstreamClient<FakeUpstream, MemoryCache> {
        CachedUpstreamClient::new(upstream.clone(), cache.clone(), CacheTtls::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_slots_query_is_a_cache_hit() {
        let upstream = Arc::new(FakeUpstream::place_123());
        let cache = Arc::new(MemoryCache::new(100));
        let client = cached(&upstream, &cache);

        let first = client.list_slots(1, 10, march_first()).await.unwrap();
        let second = client.list_slots(1, 10, march_first()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(upstream.slots_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slots_scenario_four_then_six_minutes() {
        let upstream = Arc::new(FakeUpstream::place_123());
        let cache = Arc::new(MemoryCache::new(100));
        let client = cached(&upstream, &cache);

        let first = client.list_slots(1, 10, march_first()).await.unwrap();
        assert_eq!(upstream.slots_calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(4 * 60)).await;
        let at_four = client.list_slots(1, 10, march_first()).await.unwrap();
        assert_eq!(at_four, first);
        assert_eq!(upstream.slots_calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(2 * 60)).await;
        client.list_slots(1, 10, march_first()).await.unwrap();
        assert_eq!(upstream.slots_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_courts_expire_after_one_minute() {
        let upstream = Arc::new(FakeUpstream::place_123());
        let cache = Arc::new(MemoryCache::new(100));
        let client = cached(&upstream, &cache);

        client.list_courts(1).await.unwrap();
        tokio::time::advance(Duration::from_secs(59)).await;
        client.list_courts(1).await.unwrap();
        assert_eq!(upstream.courts_calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(1)).await;
        client.list_courts(1).await.unwrap();
        assert_eq!(upstream.courts_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clubs_are_cached_per_place() {
        let upstream = Arc::new(FakeUpstream::place_123());
        let cache = Arc::new(MemoryCache::new(100));
        let client = cached(&upstream, &cache);

        client.list_clubs("123").await.unwrap();
        client.list_clubs("123").await.unwrap();
        assert_eq!(upstream.clubs_calls.load(Ordering::SeqCst), 1);

        // A different place is a different key
        let _ = client.list_clubs("456").await;
        assert_eq!(upstream.clubs_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_courts_forces_refetch_with_ttl_left() {
        let upstream = Arc::new(FakeUpstream::place_123());
        upstream.add_courts(2, vec![Court::new(20, 2, "Cancha B")]);
        let cache = Arc::new(MemoryCache::new(100));
        let client = cached(&upstream, &cache);

        client.list_courts(1).await.unwrap();
        client.list_courts(2).await.unwrap();
        assert_eq!(upstream.courts_calls.load(Ordering::SeqCst), 2);

        // 50 seconds of TTL left on both entries
        tokio::time::advance(Duration::from_secs(10)).await;
        client.invalidate_courts(1).await.unwrap();

        client.list_courts(1).await.unwrap();
        assert_eq!(upstream.courts_calls.load(Ordering::SeqCst), 3);

        client.list_courts(2).await.unwrap();
        assert_eq!(upstream.courts_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_courts_only_policy_keeps_cached_slots() {
        let upstream = Arc::new(FakeUpstream::place_123());
        let cache = Arc::new(MemoryCache::new(100));
        let client = cached(&upstream, &cache);

        client.list_slots(1, 10, march_first()).await.unwrap();
        client.invalidate_courts(1).await.unwrap();
        client.list_slots(1, 10, march_first()).await.unwrap();

        // Known staleness window: slots survive a club update until their TTL
        assert_eq!(upstream.slots_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cascade_policy_evicts_club_slots() {
        let upstream = Arc::new(FakeUpstream::place_123());
        let cache = Arc::new(MemoryCache::new(100));
        let client = cached(&upstream, &cache).with_slot_invalidation(SlotInvalidation::Cascade);

        client.list_slots(1, 10, march_first()).await.unwrap();
        client.invalidate_courts(1).await.unwrap();
        client.list_slots(1, 10, march_first()).await.unwrap();

        assert_eq!(upstream.slots_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_cached() {
        let upstream = Arc::new(FakeUpstream::place_123());
        let cache = Arc::new(MemoryCache::new(100));
        let client = cached(&upstream, &cache);

        upstream.fail(
            &slots_key(1, 10, march_first()),
            UpstreamError::Unavailable("connection reset".to_string()),
        );
        let err = client.list_slots(1, 10, march_first()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Unavailable(_)));

        upstream.recover(&slots_key(1, 10, march_first()));
        let slots = client.list_slots(1, 10, march_first()).await.unwrap();
        assert!(!slots.is_empty());
        assert_eq!(upstream.slots_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let upstream = Arc::new(FakeUpstream::place_123());
        let cache = Arc::new(MemoryCache::new(100));
        let client = cached(&upstream, &cache);

        assert!(client.list_courts(99).await.is_err());
        assert!(client.list_courts(99).await.is_err());
        assert_eq!(upstream.courts_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_list_is_cached() {
        let upstream = Arc::new(FakeUpstream::place_123());
        upstream.add_courts(3, Vec::new());
        let cache = Arc::new(MemoryCache::new(100));
        let client = cached(&upstream, &cache);

        assert!(client.list_courts(3).await.unwrap().is_empty());
        assert!(client.list_courts(3).await.unwrap().is_empty());
        assert_eq!(upstream.courts_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_undecodable_cache_entry_is_a_miss() {
        let upstream = Arc::new(FakeUpstream::place_123());
        let cache = Arc::new(MemoryCache::new(100));
        let client = cached(&upstream, &cache);

        cache.set(&courts_key(1), b"{broken", None).await.unwrap();

        let courts = client.list_courts(1).await.unwrap();
        assert_eq!(courts.len(), 1);
        assert_eq!(upstream.courts_calls.load(Ordering::SeqCst), 1);

        // Repaired by the refetch
        client.list_courts(1).await.unwrap();
        assert_eq!(upstream.courts_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unavailable_cache_degrades_to_upstream() {
        let upstream = Arc::new(FakeUpstream::place_123());
        let client = CachedUpstreamClient::new(
            upstream.clone(),
            Arc::new(FailingCache),
            CacheTtls::default(),
        );

        client.list_clubs("123").await.unwrap();
        client.list_clubs("123").await.unwrap();

        assert_eq!(upstream.clubs_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidation_failure_is_returned() {
        let upstream = Arc::new(FakeUpstream::place_123());
        let client = CachedUpstreamClient::new(upstream, Arc::new(FailingCache), CacheTtls::default());

        let err = client.invalidate_courts(1).await.unwrap_err();

        assert!(matches!(err, cache::CacheError::ConnectionFailed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_query_writes_nothing() {
        let upstream = Arc::new(FakeUpstream::place_123().with_latency(Duration::from_secs(5)));
        let cache = Arc::new(MemoryCache::new(100));
        let client = cached(&upstream, &cache);

        let abandoned = tokio::time::timeout(
            Duration::from_secs(1),
            client.list_slots(1, 10, march_first()),
        )
        .await;
        assert!(abandoned.is_err());
        assert!(cache
            .get(&slots_key(1, 10, march_first()))
            .await
            .unwrap()
            .is_none());

        let slots = client.list_slots(1, 10, march_first()).await.unwrap();

        assert_eq!(slots.len(), 3);
        assert_eq!(upstream.slots_calls.load(Ordering::SeqCst), 2);
        assert!(cache
            .get(&slots_key(1, 10, march_first()))
            .await
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_slot_invalidation_from_str() {
        assert_eq!(
            "cascade".parse::<SlotInvalidation>(),
            Ok(SlotInvalidation::Cascade)
        );
        assert_eq!(
            "Courts-Only".parse::<SlotInvalidation>(),
            Ok(SlotInvalidation::CourtsOnly)
        );
        assert!("sometimes".parse::<SlotInvalidation>().is_err());
    }
}
