//! Upstream client implementations.
//!
//! - [`HttpUpstreamClient`]: talks to the facility-data API over HTTP
//! - [`CachedUpstreamClient`]: read-through cache decorator over any
//!   `UpstreamClient`, with explicit invalidation hooks

mod cached;
mod http;

pub use cached::{CacheTtls, CachedUpstreamClient, SlotInvalidation};
pub use http::HttpUpstreamClient;
