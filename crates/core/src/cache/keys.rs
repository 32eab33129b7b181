use chrono::NaiveDate;

use crate::availability::{ClubId, CourtId};

/// Returns the cache key for the clubs of a place.
pub fn clubs_key(place_id: &str) -> String {
    format!("place:{}:clubs", place_id)
}

/// Returns the cache key for the courts of a club.
pub fn courts_key(club_id: ClubId) -> String {
    format!("club:{}:courts", club_id)
}

/// Returns the cache key for the slots of a court on a calendar date.
///
/// The date is always rendered as `YYYY-MM-DD`.
pub fn slots_key(club_id: ClubId, court_id: CourtId, date: NaiveDate) -> String {
    format!(
        "club:{}:court:{}:slots:{}",
        club_id,
        court_id,
        date.format("%Y-%m-%d")
    )
}

/// Returns the pattern matching every slot key of a club.
pub fn club_slots_pattern(club_id: ClubId) -> String {
    format!("club:{}:court:*", club_id)
}

/// Returns the Redis Set key tracking the slot keys cached for a club.
///
/// Lets a club's slot keys be evicted without a SCAN over the keyspace.
pub fn club_tracking_key(club_id: ClubId) -> String {
    format!("club:{}:_slot_keys", club_id)
}

/// Extracts the club ID from a cache key, if present.
///
/// Returns `None` for non-club keys (e.g., `"place:123:clubs"`).
///
/// # Examples
///
/// ```
/// use courtsync_core::cache::extract_club_id_from_key;
///
/// assert_eq!(extract_club_id_from_key("club:7:court:3:slots:2024-03-01"), Some(7));
/// assert_eq!(extract_club_id_from_key("club:7:courts"), Some(7));
/// assert_eq!(extract_club_id_from_key("place:123:clubs"), None);
/// ```
pub fn extract_club_id_from_key(key: &str) -> Option<ClubId> {
    let rest = key.strip_prefix("club:")?;
    let id_part = rest.split(':').next()?;
    id_part.parse().ok()
}

/// Extracts the club ID from a cache pattern, if present.
///
/// Returns `None` for non-club patterns or patterns with a wildcard in the
/// club ID position.
pub fn extract_club_id_from_pattern(pattern: &str) -> Option<ClubId> {
    let rest = pattern.strip_prefix("club:")?;
    let id_part = rest.split(':').next()?;
    if id_part.contains('*') {
        return None;
    }
    id_part.parse().ok()
}

/// Checks if a cache key is a slots key
/// (`"club:{club_id}:court:{court_id}:slots:{date}"`).
///
/// Slot keys are the ones tracked per club for cascade invalidation.
pub fn is_slots_key(key: &str) -> bool {
    let Some(rest) = key.strip_prefix("club:") else {
        return false;
    };
    let parts: Vec<&str> = rest.split(':').collect();
    parts.len() == 5
        && parts[0].parse::<ClubId>().is_ok()
        && parts[1] == "court"
        && parts[3] == "slots"
}
