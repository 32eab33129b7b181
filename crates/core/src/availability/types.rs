use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::upstream::{UpstreamError, UpstreamErrorKind};

/// Upstream identifier of a club.
pub type ClubId = i64;

/// Upstream identifier of a court.
pub type CourtId = i64;

/// Where a club is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<String>,
}

/// A sports club as listed by the upstream for a place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
}

impl Club {
    pub fn new(id: ClubId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            permalink: None,
            location: None,
        }
    }

    pub fn with_location(mut self, name: impl Into<String>, city: impl Into<String>) -> Self {
        self.location = Some(Location {
            name: name.into(),
            city: city.into(),
            ..Location::default()
        });
        self
    }
}

/// Physical features of a court.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtAttributes {
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub light: bool,
    #[serde(default)]
    pub roofed: bool,
    #[serde(default)]
    pub beelup: bool,
}

/// A court belonging to exactly one club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    /// Owning club. The upstream omits it, the transport client fills it in.
    #[serde(default)]
    pub club_id: ClubId,
    pub name: String,
    #[serde(default)]
    pub attributes: Option<CourtAttributes>,
    #[serde(default)]
    pub sports: Vec<String>,
}

impl Court {
    pub fn new(id: CourtId, club_id: ClubId, name: impl Into<String>) -> Self {
        Self {
            id,
            club_id,
            name: name.into(),
            attributes: None,
            sports: Vec::new(),
        }
    }
}

fn default_available() -> bool {
    true
}

/// A bookable interval of a court.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Local start of the slot.
    pub datetime: NaiveDateTime,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    /// Length in minutes.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(rename = "_priority", default)]
    pub priority: i32,
    /// The upstream only lists open slots, so a missing flag means available.
    #[serde(default = "default_available")]
    pub available: bool,
}

impl Slot {
    /// Creates an available slot starting at `datetime` and lasting `duration` minutes.
    pub fn new(datetime: NaiveDateTime, duration: u32) -> Self {
        let end = datetime + chrono::Duration::minutes(i64::from(duration));
        Self {
            datetime,
            start: datetime.format("%H:%M").to_string(),
            end: end.format("%H:%M").to_string(),
            duration,
            price: 0.0,
            priority: 0,
            available: true,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Marks the slot as already taken.
    pub fn taken(mut self) -> Self {
        self.available = false;
        self
    }

    /// Calendar date the slot starts on.
    pub fn date(&self) -> NaiveDate {
        self.datetime.date()
    }
}

/// Why a section of an availability result is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionError {
    pub kind: UpstreamErrorKind,
    pub message: String,
}

impl From<&UpstreamError> for SectionError {
    fn from(error: &UpstreamError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Available slots of one court on the requested date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourtAvailability {
    pub court: Court,
    pub available: Vec<Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SectionError>,
}

/// Courts of one club with their available slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubAvailability {
    pub club_id: ClubId,
    /// Present when the club came from a place listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club: Option<Club>,
    pub courts: Vec<CourtAvailability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SectionError>,
}

impl ClubAvailability {
    /// A club whose courts could not be listed.
    pub fn failed(club_id: ClubId, club: Option<Club>, error: &UpstreamError) -> Self {
        Self {
            club_id,
            club,
            courts: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Returns the first failed section of this club, if any.
    pub fn first_failure(&self) -> Option<(String, &SectionError)> {
        if let Some(error) = &self.error {
            return Some((format!("club {}", self.club_id), error));
        }
        self.courts.iter().find_map(|c| {
            c.error
                .as_ref()
                .map(|e| (format!("club {} court {}", self.club_id, c.court.id), e))
        })
    }
}

/// Availability of every club of a place on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceAvailability {
    pub place_id: String,
    pub date: NaiveDate,
    pub clubs: Vec<ClubAvailability>,
}

impl PlaceAvailability {
    /// True when at least one club or court section failed.
    pub fn is_partial(&self) -> bool {
        self.first_failure().is_some()
    }

    /// Returns the first failed section, labelled for error reporting.
    pub fn first_failure(&self) -> Option<(String, &SectionError)> {
        self.clubs.iter().find_map(ClubAvailability::first_failure)
    }
}
