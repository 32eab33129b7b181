mod error;
mod keys;
mod patterns;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{
    club_slots_pattern, club_tracking_key, clubs_key, courts_key, extract_club_id_from_key,
    extract_club_id_from_pattern, is_slots_key, slots_key,
};
pub use patterns::pattern_matches;
pub use serialization::{from_cache_bytes, to_cache_bytes};
pub use traits::Cache;
