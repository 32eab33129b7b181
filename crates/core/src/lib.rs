//! Functional core of courtsync.
//!
//! Domain types, cache key construction, error taxonomies and the traits the
//! server crate implements. Nothing in here performs I/O.

pub mod availability;
pub mod cache;
pub mod upstream;
