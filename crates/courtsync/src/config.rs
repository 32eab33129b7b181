use std::{env, str::FromStr, time::Duration};

use crate::aggregator::PartialFailure;
use crate::upstream::{CacheTtls, SlotInvalidation};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the facility API (default: "http://localhost:4000")
    pub upstream_base_url: String,
    /// Upstream request timeout in seconds (default: 10)
    pub upstream_timeout_seconds: u64,
    /// Maximum number of entries of the memory cache (default: 100)
    /// Note: Only used when the `memory` feature is enabled.
    #[allow(dead_code)]
    pub cache_max_entries: usize,
    /// TTL of cached clubs in seconds (default: 300)
    pub clubs_ttl_seconds: u64,
    /// TTL of cached courts in seconds (default: 60)
    pub courts_ttl_seconds: u64,
    /// TTL of cached slots in seconds (default: 300)
    pub slots_ttl_seconds: u64,
    /// What a club-updated event evicts (default: courts-only)
    pub slot_invalidation: SlotInvalidation,
    /// How failed sections of an aggregation are handled (default: report)
    pub partial_failure: PartialFailure,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ATC_BASE_URL` - Facility API base URL (default: "http://localhost:4000")
    /// - `UPSTREAM_TIMEOUT_SECONDS` - Upstream request timeout (default: 10)
    /// - `CACHE_MAX_ENTRIES` - Maximum memory cache entries (default: 100)
    /// - `CLUBS_TTL_SECONDS` - Clubs TTL (default: 300)
    /// - `COURTS_TTL_SECONDS` - Courts TTL (default: 60)
    /// - `SLOTS_TTL_SECONDS` - Slots TTL (default: 300)
    /// - `SLOT_INVALIDATION` - `courts-only` or `cascade` (default: courts-only)
    /// - `PARTIAL_FAILURE` - `report` or `abort` (default: report)
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    ///
    /// Values that do not parse fall back to their default.
    pub fn from_env() -> Self {
        Self {
            upstream_base_url: env::var("ATC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:4000".to_string()),
            upstream_timeout_seconds: parse_var("UPSTREAM_TIMEOUT_SECONDS", 10),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES", 100),
            clubs_ttl_seconds: parse_var("CLUBS_TTL_SECONDS", 300),
            courts_ttl_seconds: parse_var("COURTS_TTL_SECONDS", 60),
            slots_ttl_seconds: parse_var("SLOTS_TTL_SECONDS", 300),
            slot_invalidation: parse_var("SLOT_INVALIDATION", SlotInvalidation::default()),
            partial_failure: parse_var("PARTIAL_FAILURE", PartialFailure::default()),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }

    /// Per-entity TTLs for the cached upstream client.
    pub fn cache_ttls(&self) -> CacheTtls {
        CacheTtls {
            clubs: Duration::from_secs(self.clubs_ttl_seconds),
            courts: Duration::from_secs(self.courts_ttl_seconds),
            slots: Duration::from_secs(self.slots_ttl_seconds),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
