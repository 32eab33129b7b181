//! In-memory cache backend.
//!
//! Thread-safe, LRU-bounded, with TTL support for single-instance deployments.

mod cache;

pub use cache::MemoryCache;
