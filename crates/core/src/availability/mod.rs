mod error;
mod events;
mod http_mapping;
mod operations;
mod requests;
mod types;

pub use error::{AvailabilityError, Result};
pub use events::AvailabilityEvent;
pub use http_mapping::{availability_error_to_status_code, cache_error_to_status_code};
pub use operations::{available_slots, court_availability, unlisted_club};
pub use requests::{parse_query_date, ClubAvailabilityQuery, SearchQuery};
pub use types::{
    Club, ClubAvailability, ClubId, Court, CourtAttributes, CourtAvailability, CourtId, Location,
    PlaceAvailability, SectionError, Slot,
};
