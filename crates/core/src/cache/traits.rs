use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Key/value store with per-entry expiration.
///
/// Implementations must never return a value whose TTL has elapsed, and a
/// `delete` must make the next `get` of that key return `None`.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key. Expired values read as `None`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL. Last write wins.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Deletes all values matching a pattern (e.g., `"club:1:court:*"`).
    async fn delete_pattern(&self, pattern: &str) -> Result<()>;
}
