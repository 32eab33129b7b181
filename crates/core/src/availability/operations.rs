use chrono::NaiveDate;

use crate::upstream::{self, UpstreamError};

use super::types::{Club, ClubAvailability, ClubId, Court, CourtAvailability, Slot};

/// Keeps the slots that are open and start on `date`, earliest first.
pub fn available_slots(slots: Vec<Slot>, date: NaiveDate) -> Vec<Slot> {
    let mut open: Vec<Slot> = slots
        .into_iter()
        .filter(|slot| slot.available && slot.date() == date)
        .collect();
    open.sort_by_key(|slot| slot.datetime);
    open
}

/// Builds the section of one court from the outcome of its slots fetch.
///
/// `NotFound` means the court has no slots, which is data, not a failure.
pub fn court_availability(
    court: Court,
    date: NaiveDate,
    fetched: upstream::Result<Vec<Slot>>,
) -> CourtAvailability {
    match fetched {
        Ok(slots) => CourtAvailability {
            court,
            available: available_slots(slots, date),
            error: None,
        },
        Err(UpstreamError::NotFound { .. }) => CourtAvailability {
            court,
            available: Vec::new(),
            error: None,
        },
        Err(err) => CourtAvailability {
            court,
            available: Vec::new(),
            error: Some((&err).into()),
        },
    }
}

/// Builds the section of a club whose courts could not be listed.
///
/// `NotFound` yields an empty, successful section.
pub fn unlisted_club(
    club_id: ClubId,
    club: Option<Club>,
    error: &UpstreamError,
) -> ClubAvailability {
    if matches!(error, UpstreamError::NotFound { .. }) {
        return ClubAvailability {
            club_id,
            club,
            courts: Vec::new(),
            error: None,
        };
    }
    ClubAvailability::failed(club_id, club, error)
}
