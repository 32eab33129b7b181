use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use super::error::AvailabilityError;

/// Query for the availability of every club of a place (`GET /search`).
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "placeId")]
    pub place_id: String,
    pub date: String,
}

/// Query for the availability of a single club.
#[derive(Debug, Clone, Deserialize)]
pub struct ClubAvailabilityQuery {
    pub date: String,
}

/// Parses the calendar date of an inbound query.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 date-time. A date-time is reduced to
/// its calendar date in its own offset; the time of day is dropped.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use courtsync_core::availability::parse_query_date;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// assert_eq!(parse_query_date("2024-03-01").unwrap(), expected);
/// assert_eq!(parse_query_date("2024-03-01T23:30:00-03:00").unwrap(), expected);
/// ```
pub fn parse_query_date(raw: &str) -> Result<NaiveDate, AvailabilityError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| {
            AvailabilityError::InvalidQuery(format!(
                "date must be YYYY-MM-DD or an RFC 3339 date-time, got {:?}",
                raw
            ))
        })
}
