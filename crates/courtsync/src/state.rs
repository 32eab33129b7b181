//! Shared application state.

use std::sync::Arc;

use courtsync_core::upstream::CachedUpstream;

use crate::aggregator::{AvailabilityAggregator, PartialFailure};
use crate::invalidation::EventHandler;

/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<AvailabilityAggregator>,
    pub events: Arc<EventHandler>,
}

impl AppState {
    /// Wires the aggregator and the event handler to the same cached client,
    /// so evictions are visible to the next query.
    pub fn new<T>(upstream: Arc<T>, partial_failure: PartialFailure) -> Self
    where
        T: CachedUpstream + 'static,
    {
        let aggregator =
            AvailabilityAggregator::new(upstream.clone()).with_partial_failure(partial_failure);

        Self {
            aggregator: Arc::new(aggregator),
            events: Arc::new(EventHandler::new(upstream)),
        }
    }
}
