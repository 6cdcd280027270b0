//! Location feed client trait and HTTP implementation.
//!
//! The [`LocationClient`] trait abstracts over the cloud service that
//! reports tracked tile positions, so the poll loop can run against a
//! mock in tests. The [`FeedClient`] implementation fetches the JSON
//! position feed directly via `reqwest`.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::coord::Coordinate;

use super::error::TrackerError;
use super::point::TrackedPoint;

/// Default HTTP timeout for fetching the position feed.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// One tile's position as reported by the feed.
///
/// This is our own type, decoupled from any particular vendor payload.
/// Only the fields needed for geofence evaluation are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionRecord {
    pub name: String,
    pub uuid: String,
    pub latitude: f64,
    pub longitude: f64,
    pub last_updated: String,
}

impl PositionRecord {
    /// Validate the reported position into a [`Coordinate`].
    pub fn coordinate(&self) -> Result<Coordinate, TrackerError> {
        Ok(Coordinate::new(self.latitude, self.longitude)?)
    }

    /// Parse the RFC 3339 `last_updated` timestamp.
    pub fn timestamp(&self) -> Result<DateTime<Utc>, TrackerError> {
        DateTime::parse_from_rfc3339(&self.last_updated)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| TrackerError::TimestampParse(e.to_string()))
    }

    /// Convert into a freshly tracked point.
    pub fn into_tracked_point(self) -> Result<TrackedPoint, TrackerError> {
        let coordinate = self.coordinate()?;
        let timestamp = self.timestamp()?;
        Ok(TrackedPoint::new(&self.name, &self.uuid, coordinate, timestamp))
    }
}

/// Trait for fetching current positions of all tracked tiles.
pub trait LocationClient: Send + Sync {
    /// Fetch the current position of every tile on the account.
    fn fetch_positions(
        &self,
    ) -> impl Future<Output = Result<Vec<PositionRecord>, TrackerError>> + Send;
}

/// Top-level feed document.
///
/// We only deserialize the `tiles` array; other fields are ignored.
#[derive(Deserialize)]
struct FeedData {
    tiles: Vec<PositionRecord>,
}

/// Feed client using direct HTTP requests.
///
/// Uses a reusable `reqwest::Client` with connection pooling and a
/// request timeout; authenticates with a bearer token.
pub struct FeedClient {
    http: reqwest::Client,
    feed_url: String,
    access_token: String,
}

impl FeedClient {
    /// Create a feed client for the configured account.
    pub fn new(feed_url: &str, access_token: &str) -> Result<Self, TrackerError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| TrackerError::HttpError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            feed_url: feed_url.to_string(),
            access_token: access_token.to_string(),
        })
    }
}

impl LocationClient for FeedClient {
    async fn fetch_positions(&self) -> Result<Vec<PositionRecord>, TrackerError> {
        let response = self
            .http
            .get(&self.feed_url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| TrackerError::HttpError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::HttpError(format!(
                "HTTP {} from {}",
                status, self.feed_url
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TrackerError::HttpError(e.to_string()))?;

        let data: FeedData =
            serde_json::from_slice(&bytes).map_err(|e| TrackerError::JsonError(e.to_string()))?;

        tracing::debug!(total_tiles = data.tiles.len(), "Location feed fetched");

        Ok(data.tiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(latitude: f64, longitude: f64) -> PositionRecord {
        PositionRecord {
            name: "keys".to_string(),
            uuid: "uuid-keys".to_string(),
            latitude,
            longitude,
            last_updated: "2026-08-07T09:30:00Z".to_string(),
        }
    }

    #[test]
    fn test_record_converts_to_tracked_point() {
        let point = record(40.690080, -74.045290).into_tracked_point().unwrap();

        assert_eq!(point.name(), "keys");
        assert_eq!(point.uuid(), "uuid-keys");
        assert_eq!(point.coordinate().latitude(), 40.690080);
        assert_eq!(
            point.last_update(),
            DateTime::parse_from_rfc3339("2026-08-07T09:30:00Z")
                .unwrap()
                .with_timezone(&Utc)
        );
    }

    #[test]
    fn test_record_with_invalid_latitude_is_rejected() {
        let result = record(95.0, 0.0).into_tracked_point();
        assert!(matches!(result, Err(TrackerError::InvalidPosition(_))));
    }

    #[test]
    fn test_record_with_bad_timestamp_is_rejected() {
        let mut bad = record(0.0, 0.0);
        bad.last_updated = "yesterday-ish".to_string();

        let result = bad.into_tracked_point();
        assert!(matches!(result, Err(TrackerError::TimestampParse(_))));
    }

    #[test]
    fn test_feed_document_decoding() {
        let body = r#"{
            "tiles": [
                { "name": "keys", "uuid": "u1", "latitude": 1.0, "longitude": 2.0, "last_updated": "2026-08-07T09:30:00Z" },
                { "name": "wallet", "uuid": "u2", "latitude": 3.0, "longitude": 4.0, "last_updated": "2026-08-07T09:31:00Z" }
            ],
            "revision": 12
        }"#;

        let data: FeedData = serde_json::from_slice(body.as_bytes()).unwrap();
        assert_eq!(data.tiles.len(), 2);
        assert_eq!(data.tiles[1].name, "wallet");
    }

    #[test]
    fn test_client_construction() {
        let client = FeedClient::new("https://feed.example/positions", "token").unwrap();
        assert_eq!(client.feed_url, "https://feed.example/positions");
    }
}
