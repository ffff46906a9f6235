// REST collaborator for the availability engine: fetches the "list hotels
// with nested categories, rooms and bookedDates" endpoint and runs the
// snapshot validation. The engine never performs I/O itself; callers fetch a
// snapshot here and pass it in explicitly.

use crate::model::Hotel;
use crate::snapshot::{decode_hotels, DecodeError};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

// Error types for the snapshot fetch
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    NetworkError(String),

    #[error("booking API returned status {0}")]
    HttpStatus(u16),

    #[error("snapshot decode failed: {0}")]
    Decode(#[from] DecodeError),
}

// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_ms: 10_000,
        }
    }
}

// Anything that can produce a fresh hotel snapshot. Refresh policy belongs to
// the caller; a provider has no notion of staleness or caching.
#[async_trait]
pub trait SnapshotProvider: Send + Sync + 'static {
    async fn fetch_hotels(&self) -> Result<Vec<Hotel>, FetchError>;
}

// HTTP implementation over the booking API
pub struct HttpSnapshotClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpSnapshotClient {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn hotels_url(&self) -> String {
        format!("{}/hotels", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SnapshotProvider for HttpSnapshotClient {
    async fn fetch_hotels(&self) -> Result<Vec<Hotel>, FetchError> {
        let url = self.hotels_url();
        tracing::debug!(%url, "fetching hotel snapshot");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "snapshot fetch rejected");
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;
        let hotels = decode_hotels(&body)?;

        tracing::info!(hotels = hotels.len(), "hotel snapshot refreshed");
        Ok(hotels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parse_day;
    use crate::engine::AvailabilityEngine;
    use crate::model::StayRequest;
    use crate::snapshot::SMALL_SAMPLE_JSON;

    // In-process provider serving a canned response, standing in for the
    // booking API during tests
    enum MockProvider {
        Body(String),
        Status(u16),
    }

    #[async_trait]
    impl SnapshotProvider for MockProvider {
        async fn fetch_hotels(&self) -> Result<Vec<Hotel>, FetchError> {
            match self {
                MockProvider::Body(body) => Ok(decode_hotels(body)?),
                MockProvider::Status(code) => Err(FetchError::HttpStatus(*code)),
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_and_query_round_trip() {
        let provider = MockProvider::Body(SMALL_SAMPLE_JSON.to_string());
        let snapshot = provider.fetch_hotels().await.unwrap();

        let engine = AvailabilityEngine::new();
        let request = StayRequest {
            hotel_name: "Seaview".to_string(),
            category_name: "Deluxe".to_string(),
            room_name: None,
            check_in: parse_day("2024-06-10").unwrap(),
            check_out: parse_day("2024-06-10").unwrap(),
        };

        // Room 101 is booked on the 10th in the sample, so only 102 shows up
        let results = engine.find_available_rooms(&snapshot, &request);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].room_name, "102");
    }

    #[tokio::test]
    async fn test_decode_failure_surfaces_as_fetch_error() {
        let provider = MockProvider::Body("{broken".to_string());
        let err = provider.fetch_hotels().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(DecodeError::JsonParseError(_))));
    }

    #[tokio::test]
    async fn test_http_status_error() {
        let provider = MockProvider::Status(503);
        let err = provider.fetch_hotels().await.unwrap_err();
        assert!(matches!(err, FetchError::HttpStatus(503)));
    }

    #[test]
    fn test_hotels_url_joins_cleanly() {
        let client = HttpSnapshotClient::new(ClientConfig {
            base_url: "http://api.example.com/".to_string(),
            timeout_ms: 1_000,
        })
        .unwrap();
        assert_eq!(client.hotels_url(), "http://api.example.com/hotels");
    }
}
