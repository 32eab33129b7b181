//! HTTP transport for the upstream facility-data API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use courtsync_core::availability::{Club, ClubId, Court, CourtId, Slot};
use courtsync_core::upstream::{Result, UpstreamClient, UpstreamError};

/// HTTP client for the upstream API.
#[derive(Debug, Clone)]
pub struct HttpUpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUpstreamClient {
    /// Create a client for `base_url` whose requests give up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a response into a decoded body or a classified error.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: impl FnOnce() -> String,
    ) -> Result<T> {
        let status = response.status();
        if status.as_u16() == 404 {
            return Err(UpstreamError::NotFound {
                resource: resource(),
            });
        }
        if status.is_server_error() {
            return Err(UpstreamError::Unavailable(format!(
                "upstream answered {}",
                status
            )));
        }
        if !status.is_success() {
            return Err(UpstreamError::InvalidResponse(format!(
                "unexpected status {}",
                status
            )));
        }

        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(|e| UpstreamError::InvalidResponse(e.to_string()))
    }
}

fn transport_error(err: reqwest::Error) -> UpstreamError {
    UpstreamError::Unavailable(err.to_string())
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn list_clubs(&self, place_id: &str) -> Result<Vec<Club>> {
        let response = self
            .client
            .get(self.url("/clubs"))
            .query(&[("placeId", place_id)])
            .send()
            .await
            .map_err(transport_error)?;
        self.handle_response(response, || format!("clubs for place {}", place_id))
            .await
    }

    async fn list_courts(&self, club_id: ClubId) -> Result<Vec<Court>> {
        let response = self
            .client
            .get(self.url(&format!("/clubs/{}/courts", club_id)))
            .send()
            .await
            .map_err(transport_error)?;
        let mut courts: Vec<Court> = self
            .handle_response(response, || format!("courts for club {}", club_id))
            .await?;

        for court in &mut courts {
            court.club_id = club_id;
        }
        Ok(courts)
    }

    async fn list_slots(
        &self,
        club_id: ClubId,
        court_id: CourtId,
        date: NaiveDate,
    ) -> Result<Vec<Slot>> {
        let date = date.format("%Y-%m-%d").to_string();
        let response = self
            .client
            .get(self.url(&format!("/clubs/{}/courts/{}/slots", club_id, court_id)))
            .query(&[("date", date.as_str())])
            .send()
            .await
            .map_err(transport_error)?;
        self.handle_response(response, || {
            format!("slots for club {} court {} on {}", club_id, court_id, date)
        })
        .await
    }
}
