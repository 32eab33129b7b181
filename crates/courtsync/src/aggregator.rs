//! Availability aggregation.
//!
//! Answers "which courts are free on this date" for a place or a club by
//! walking clubs -> courts -> slots through an [`UpstreamClient`] (the cached
//! one in production). Club and court sections are fetched concurrently.
//!
//! # Partial failures
//!
//! With [`PartialFailure::Report`] (the default) a club whose courts cannot be
//! listed, or a court whose slots cannot be listed, is returned with an
//! `error` annotation and the rest of the result is still served. With
//! [`PartialFailure::Abort`] the first failed section fails the whole query.
//! Upstream `NotFound` is never a failure: the section is simply empty.
//!
//! The initiating fetch (clubs of the place, or courts of the club) has no
//! result to annotate, so its failure is always the query's error.

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use futures_util::future::join_all;

use courtsync_core::availability::{
    court_availability, unlisted_club, AvailabilityError, Club, ClubAvailability, ClubId, Court,
    CourtAvailability, PlaceAvailability, Result,
};
use courtsync_core::upstream::UpstreamClient;

/// How the aggregator treats a failed club or court section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartialFailure {
    /// Annotate the failed section and keep going.
    #[default]
    Report,
    /// Fail the whole query.
    Abort,
}

impl FromStr for PartialFailure {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "report" => Ok(Self::Report),
            "abort" => Ok(Self::Abort),
            other => Err(format!("unknown partial failure policy: {}", other)),
        }
    }
}

/// Builds availability views from upstream clubs, courts and slots.
pub struct AvailabilityAggregator {
    upstream: Arc<dyn UpstreamClient>,
    partial_failure: PartialFailure,
}

impl AvailabilityAggregator {
    pub fn new(upstream: Arc<dyn UpstreamClient>) -> Self {
        Self {
            upstream,
            partial_failure: PartialFailure::default(),
        }
    }

    pub fn with_partial_failure(mut self, policy: PartialFailure) -> Self {
        self.partial_failure = policy;
        self
    }

    /// Availability of every club of a place on `date`.
    pub async fn for_place(&self, place_id: &str, date: NaiveDate) -> Result<PlaceAvailability> {
        let clubs = self.upstream.list_clubs(place_id).await?;

        let sections = join_all(
            clubs
                .into_iter()
                .map(|club| self.club_section(club.id, Some(club), date)),
        )
        .await;

        let availability = PlaceAvailability {
            place_id: place_id.to_string(),
            date,
            clubs: sections,
        };

        if let Some((section, error)) = availability.first_failure() {
            if self.partial_failure == PartialFailure::Abort {
                return Err(AvailabilityError::Incomplete {
                    section,
                    error: error.clone(),
                });
            }
            tracing::warn!(place_id, %date, first_failed = %section, "Serving partial availability");
        }

        Ok(availability)
    }

    /// Availability of the courts of one club on `date`.
    pub async fn for_club(&self, club_id: ClubId, date: NaiveDate) -> Result<ClubAvailability> {
        let courts = self.upstream.list_courts(club_id).await?;

        let availability = ClubAvailability {
            club_id,
            club: None,
            courts: self.court_sections(club_id, courts, date).await,
            error: None,
        };

        if let Some((section, error)) = availability.first_failure() {
            if self.partial_failure == PartialFailure::Abort {
                return Err(AvailabilityError::Incomplete {
                    section,
                    error: error.clone(),
                });
            }
            tracing::warn!(club_id, %date, first_failed = %section, "Serving partial availability");
        }

        Ok(availability)
    }

    async fn club_section(
        &self,
        club_id: ClubId,
        club: Option<Club>,
        date: NaiveDate,
    ) -> ClubAvailability {
        match self.upstream.list_courts(club_id).await {
            Ok(courts) => ClubAvailability {
                club_id,
                club,
                courts: self.court_sections(club_id, courts, date).await,
                error: None,
            },
            Err(err) => {
                tracing::debug!(club_id, error = %err, "Could not list courts");
                unlisted_club(club_id, club, &err)
            }
        }
    }

    async fn court_sections(
        &self,
        club_id: ClubId,
        courts: Vec<Court>,
        date: NaiveDate,
    ) -> Vec<CourtAvailability> {
        join_all(courts.into_iter().map(|court| async move {
            let fetched = self.upstream.list_slots(club_id, court.id, date).await;
            if let Err(err) = &fetched {
                tracing::debug!(club_id, court_id = court.id, error = %err, "Could not list slots");
            }
            court_availability(court, date, fetched)
        }))
        .await
    }
}
