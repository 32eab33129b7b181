use async_trait::async_trait;
use chrono::NaiveDate;

use crate::availability::{Club, ClubId, Court, CourtId, Slot};
use crate::cache;

use super::Result;

/// Read operations of the upstream facility-data provider.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Lists the clubs of a place.
    async fn list_clubs(&self, place_id: &str) -> Result<Vec<Club>>;

    /// Lists the courts of a club.
    async fn list_courts(&self, club_id: ClubId) -> Result<Vec<Court>>;

    /// Lists the slots of a court on a calendar date.
    async fn list_slots(
        &self,
        club_id: ClubId,
        court_id: CourtId,
        date: NaiveDate,
    ) -> Result<Vec<Slot>>;
}

/// Explicit eviction hooks of a caching upstream client.
#[async_trait]
pub trait UpstreamInvalidation: Send + Sync {
    /// Evicts the cached courts of a club, regardless of their TTL.
    async fn invalidate_courts(&self, club_id: ClubId) -> cache::Result<()>;
}

/// Combined trait for upstream clients that cache and can be invalidated.
pub trait CachedUpstream: UpstreamClient + UpstreamInvalidation {}

impl<T: UpstreamClient + UpstreamInvalidation> CachedUpstream for T {}
