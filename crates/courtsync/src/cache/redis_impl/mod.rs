//! Redis cache backend.
//!
//! Shares cached upstream data between instances. Connectivity failures are
//! reported as `CacheError::ConnectionFailed`, never as a miss.

mod cache;
mod error;

pub use cache::RedisCache;
