//! JSON encoding of cached values.
//!
//! Cached values are the upstream lists (`Vec<Club>`, `Vec<Court>`,
//! `Vec<Slot>`), stored as JSON so they stay readable with `redis-cli`.

use serde::{de::DeserializeOwned, Serialize};

use super::{CacheError, Result};

/// Serializes a value to JSON bytes for the cache.
pub fn to_cache_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| CacheError::Serialization(e.to_string()))
}

/// Deserializes cached JSON bytes.
pub fn from_cache_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| CacheError::Serialization(e.to_string()))
}
