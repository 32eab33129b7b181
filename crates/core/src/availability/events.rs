use serde::{Deserialize, Serialize};

use super::types::ClubId;

/// Notification from the upstream that cached data went stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AvailabilityEvent {
    /// A club changed (attributes, opening hours, court roster).
    ClubUpdated {
        #[serde(rename = "clubId")]
        club_id: ClubId,
        /// Which parts of the club changed, as reported by the upstream.
        #[serde(default)]
        fields: Vec<String>,
    },
}

impl AvailabilityEvent {
    pub fn club_updated(club_id: ClubId) -> Self {
        Self::ClubUpdated {
            club_id,
            fields: Vec::new(),
        }
    }

    /// Club the event is about.
    pub fn club_id(&self) -> ClubId {
        match self {
            Self::ClubUpdated { club_id, .. } => *club_id,
        }
    }
}
