//! Geocoding via Nominatim (OpenStreetMap)
//!
//! Turns a free-text place query into coordinates and, for device positions,
//! coordinates back into a display name. Free to use, no API key required.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::config::GeocodingConfig;
use crate::models::{Coordinates, Location};

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Transport failure or non-success status
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be understood
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,
}

/// Geocoding collaborator
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Best matches for `query`, most relevant first; empty when nothing matched
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Location>, GeocodingError>;

    /// Display name for a coordinate pair, if the service knows one
    async fn reverse(&self, coordinates: Coordinates) -> Result<Option<String>, GeocodingError>;
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct NominatimReverse {
    display_name: Option<String>,
}

impl TryFrom<NominatimPlace> for Location {
    type Error = GeocodingError;

    fn try_from(place: NominatimPlace) -> Result<Self, Self::Error> {
        let latitude: f64 = place
            .lat
            .trim()
            .parse()
            .map_err(|_| GeocodingError::ParseError(format!("Invalid latitude: {}", place.lat)))?;
        let longitude: f64 = place
            .lon
            .trim()
            .parse()
            .map_err(|_| GeocodingError::ParseError(format!("Invalid longitude: {}", place.lon)))?;

        Ok(Location::new(latitude, longitude, place.display_name))
    }
}

/// Nominatim HTTP client
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// Create a new Nominatim client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodingError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, query: &str, limit: usize) -> String {
        format!(
            "{}/search?q={}&format=json&limit={}",
            self.base_url,
            urlencoding::encode(query),
            limit
        )
    }

    fn reverse_url(&self, coordinates: Coordinates) -> String {
        format!(
            "{}/reverse?lat={}&lon={}&format=json&zoom=10",
            self.base_url, coordinates.latitude, coordinates.longitude
        )
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, GeocodingError> {
        debug!(url = %url, "Geocoding request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GeocodingError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        Ok(response)
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Location>, GeocodingError> {
        let start_time = Instant::now();
        let response = self.get(&self.search_url(query, limit)).await?;

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let locations = places
            .into_iter()
            .take(limit)
            .map(Location::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        if locations.is_empty() {
            warn!("No results found for location '{}'", query);
        } else {
            info!(
                "Found {} geocoding results for '{}' in {:.3}s",
                locations.len(),
                query,
                start_time.elapsed().as_secs_f64()
            );
        }

        Ok(locations)
    }

    #[instrument(skip(self), fields(lat = coordinates.latitude, lon = coordinates.longitude))]
    async fn reverse(&self, coordinates: Coordinates) -> Result<Option<String>, GeocodingError> {
        if !coordinates.is_valid() {
            return Err(GeocodingError::InvalidCoordinates);
        }

        let response = self.get(&self.reverse_url(coordinates)).await?;
        let body: NominatimReverse = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        Ok(body.display_name.filter(|name| !name.trim().is_empty()))
    }
}
