//! Reaction to upstream change notifications.

use std::sync::Arc;

use courtsync_core::availability::AvailabilityEvent;
use courtsync_core::cache;
use courtsync_core::upstream::UpstreamInvalidation;

/// Turns [`AvailabilityEvent`]s into cache evictions.
///
/// Handling is synchronous: when [`EventHandler::handle`] returns `Ok` the
/// stale entries are already gone.
pub struct EventHandler {
    invalidation: Arc<dyn UpstreamInvalidation>,
}

impl EventHandler {
    pub fn new(invalidation: Arc<dyn UpstreamInvalidation>) -> Self {
        Self { invalidation }
    }

    pub async fn handle(&self, event: &AvailabilityEvent) -> cache::Result<()> {
        match event {
            AvailabilityEvent::ClubUpdated { club_id, fields } => {
                tracing::info!(club_id, ?fields, "Club updated, evicting cached courts");

                if let Err(err) = self.invalidation.invalidate_courts(*club_id).await {
                    tracing::error!(club_id, error = %err, "Failed to invalidate club courts");
                    return Err(err);
                }

                Ok(())
            }
        }
    }
}
