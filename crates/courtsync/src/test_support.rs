//! Fakes shared by the unit tests of this crate.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use courtsync_core::availability::{Club, ClubId, Court, CourtId, Slot};
use courtsync_core::cache::{self, clubs_key, courts_key, slots_key, Cache, CacheError};
use courtsync_core::upstream::{self, UpstreamClient, UpstreamError};

pub fn march_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

pub fn slot_at(date: NaiveDate, hour: u32) -> Slot {
    Slot::new(date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap()), 60)
}

/// In-memory upstream that counts calls per operation.
///
/// Missing data answers `NotFound`. Failures are injected per cache key, so a
/// test names the exact query that should break.
#[derive(Default)]
pub struct FakeUpstream {
    clubs: Mutex<HashMap<String, Vec<Club>>>,
    courts: Mutex<HashMap<ClubId, Vec<Court>>>,
    slots: Mutex<HashMap<(ClubId, CourtId, NaiveDate), Vec<Slot>>>,
    failures: Mutex<HashMap<String, UpstreamError>>,
    latency: Option<Duration>,
    pub clubs_calls: AtomicUsize,
    pub courts_calls: AtomicUsize,
    pub slots_calls: AtomicUsize,
}

impl FakeUpstream {
    /// Place "123" with club 1, whose court 10 has two open slots and one
    /// taken slot on 2024-03-01.
    pub fn place_123() -> Self {
        let upstream = Self::default();
        upstream.add_clubs("123", vec![Club::new(1, "Club Uno")]);
        upstream.add_courts(1, vec![Court::new(10, 1, "Cancha 1")]);
        upstream.add_slots(
            1,
            10,
            march_first(),
            vec![
                slot_at(march_first(), 9),
                slot_at(march_first(), 10).taken(),
                slot_at(march_first(), 19),
            ],
        );
        upstream
    }

    /// Every call sleeps for `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn add_clubs(&self, place_id: &str, clubs: Vec<Club>) {
        self.clubs
            .lock()
            .unwrap()
            .insert(place_id.to_string(), clubs);
    }

    pub fn add_courts(&self, club_id: ClubId, courts: Vec<Court>) {
        self.courts.lock().unwrap().insert(club_id, courts);
    }

    pub fn add_slots(
        &self,
        club_id: ClubId,
        court_id: CourtId,
        date: NaiveDate,
        slots: Vec<Slot>,
    ) {
        self.slots
            .lock()
            .unwrap()
            .insert((club_id, court_id, date), slots);
    }

    /// Makes the query behind `key` fail with `error` until [`Self::recover`].
    pub fn fail(&self, key: &str, error: UpstreamError) {
        self.failures.lock().unwrap().insert(key.to_string(), error);
    }

    pub fn recover(&self, key: &str) {
        self.failures.lock().unwrap().remove(key);
    }

    async fn respond(&self, key: &str) -> upstream::Result<()> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.injected(key)
    }

    fn injected(&self, key: &str) -> upstream::Result<()> {
        match self.failures.lock().unwrap().get(key) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UpstreamClient for FakeUpstream {
    async fn list_clubs(&self, place_id: &str) -> upstream::Result<Vec<Club>> {
        self.clubs_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(&clubs_key(place_id)).await?;
        self.clubs
            .lock()
            .unwrap()
            .get(place_id)
            .cloned()
            .ok_or_else(|| UpstreamError::NotFound {
                resource: format!("clubs for place {}", place_id),
            })
    }

    async fn list_courts(&self, club_id: ClubId) -> upstream::Result<Vec<Court>> {
        self.courts_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(&courts_key(club_id)).await?;
        self.courts
            .lock()
            .unwrap()
            .get(&club_id)
            .cloned()
            .ok_or_else(|| UpstreamError::NotFound {
                resource: format!("courts for club {}", club_id),
            })
    }

    async fn list_slots(
        &self,
        club_id: ClubId,
        court_id: CourtId,
        date: NaiveDate,
    ) -> upstream::Result<Vec<Slot>> {
        self.slots_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(&slots_key(club_id, court_id, date)).await?;
        self.slots
            .lock()
            .unwrap()
            .get(&(club_id, court_id, date))
            .cloned()
            .ok_or_else(|| UpstreamError::NotFound {
                resource: format!("slots for club {} court {}", club_id, court_id),
            })
    }
}

/// Cache whose backend is always unreachable.
pub struct FailingCache;

#[async_trait]
impl Cache for FailingCache {
    async fn get(&self, _key: &str) -> cache::Result<Option<Vec<u8>>> {
        Err(CacheError::ConnectionFailed("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &[u8], _ttl: Option<Duration>) -> cache::Result<()> {
        Err(CacheError::ConnectionFailed("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> cache::Result<()> {
        Err(CacheError::ConnectionFailed("connection refused".to_string()))
    }

    async fn delete_pattern(&self, _pattern: &str) -> cache::Result<()> {
        Err(CacheError::ConnectionFailed("connection refused".to_string()))
    }
}
