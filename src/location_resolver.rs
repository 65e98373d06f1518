//! Location Resolution Module
//!
//! This module turns a search query or a device position into coordinates,
//! fetches the current weather there and writes it into the session.
//!
//! Each lookup runs `Idle -> Loading -> {Success, NotFound, Failed}`. The
//! session lock is never held across a network call; the weather write and
//! the end of `Loading` happen in the same critical section. A lookup that
//! starts while another one is loading is ignored.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::LookupError;
use crate::geocoding::Geocoder;
use crate::geolocation::{GeolocationError, GeolocationProvider};
use crate::models::{Coordinates, Location};
use crate::session::{LookupState, Session};
use crate::weather::{WeatherRequest, WeatherSource};

/// Number of geocoding matches requested per search
const SEARCH_LIMIT: usize = 1;

/// Types of location input
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// Coordinates typed directly into the search box
    Coordinates(Coordinates),
    /// Location name (city, region, postal code, etc.)
    Name(String),
}

impl LocationInput {
    /// Parse a trimmed query; valid "lat,lon" pairs skip geocoding
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match Self::parse_coordinates(input) {
            Some(coordinates) => Self::Coordinates(coordinates),
            None => Self::Name(input.to_string()),
        }
    }

    /// Parse coordinates from string like "46.8182,8.2275" or "46.8182 8.2275"
    fn parse_coordinates(input: &str) -> Option<Coordinates> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() != 2 {
            return None;
        }

        let latitude = parts[0].parse::<f64>().ok()?;
        let longitude = parts[1].parse::<f64>().ok()?;
        let coordinates = Coordinates::new(latitude, longitude);

        coordinates.is_valid().then_some(coordinates)
    }
}

/// What a call to the resolver ended with
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// Empty query, nothing was done
    Skipped,
    /// Another lookup was already loading, nothing was done
    Ignored,
    Resolved(Location),
    Failed(LookupError),
}

/// Service for resolving locations and loading their weather into a session
pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn WeatherSource>,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>, weather: Arc<dyn WeatherSource>) -> Self {
        Self { geocoder, weather }
    }

    /// Resolve a free-text query and load its weather
    pub async fn search(&self, session: &Mutex<Session>, query: &str) -> LookupOutcome {
        let query = query.trim();
        if query.is_empty() {
            debug!("Ignoring empty search query");
            return LookupOutcome::Skipped;
        }

        if !Self::begin(session).await {
            return LookupOutcome::Ignored;
        }

        info!("Resolving location query: '{}'", query);

        let location = match LocationInput::parse(query) {
            LocationInput::Coordinates(coordinates) => self.name_position(coordinates).await,
            LocationInput::Name(name) => match self.geocode(&name).await {
                Ok(location) => location,
                Err(error) => return Self::finish(session, error).await,
            },
        };

        self.fetch_weather(session, location).await
    }

    /// Resolve the device position and load its weather
    pub async fn locate(
        &self,
        session: &Mutex<Session>,
        provider: &dyn GeolocationProvider,
    ) -> LookupOutcome {
        if !Self::begin(session).await {
            return LookupOutcome::Ignored;
        }

        let coordinates = match provider.current_position().await {
            Ok(coordinates) => coordinates,
            Err(GeolocationError::PermissionDenied) => {
                warn!("Device location permission denied");
                return Self::finish(session, LookupError::PermissionDenied).await;
            }
            Err(e) => {
                warn!("Device location failed: {}", e);
                return Self::finish(session, LookupError::LocationUnavailable).await;
            }
        };

        info!(
            "Resolving device position: {:.4}, {:.4}",
            coordinates.latitude, coordinates.longitude
        );

        let location = self.name_position(coordinates).await;
        self.fetch_weather(session, location).await
    }

    /// Resolve a location name to coordinates via geocoding
    async fn geocode(&self, query: &str) -> Result<Location, LookupError> {
        match self.geocoder.search(query, SEARCH_LIMIT).await {
            Ok(results) => {
                let location = results.into_iter().next().ok_or_else(|| {
                    LookupError::NotFound {
                        query: query.to_string(),
                    }
                })?;
                debug!(
                    "Found location: {} ({:.4}, {:.4})",
                    location.name, location.latitude, location.longitude
                );
                Ok(location)
            }
            Err(e) => {
                warn!("Geocoding failed for '{}': {}", query, e);
                Err(LookupError::ServiceUnavailable)
            }
        }
    }

    /// Name a coordinate pair via reverse geocoding, falling back to the coordinates
    async fn name_position(&self, coordinates: Coordinates) -> Location {
        match self.geocoder.reverse(coordinates).await {
            Ok(Some(name)) => Location::new(coordinates.latitude, coordinates.longitude, name),
            Ok(None) => {
                debug!("No reverse geocoding results found, using coordinates as name");
                Location::from_coordinates(coordinates)
            }
            Err(e) => {
                debug!("Reverse geocoding failed: {}, using coordinates as name", e);
                Location::from_coordinates(coordinates)
            }
        }
    }

    async fn fetch_weather(&self, session: &Mutex<Session>, location: Location) -> LookupOutcome {
        // units are fixed when the request is issued
        let units = session.lock().await.conditions.unit_system();
        let request = WeatherRequest::native(location.coordinates(), units);

        let result = self.weather.current(&request).await;

        let mut session = session.lock().await;
        match result {
            Ok(conditions) => {
                session.conditions.apply_conditions(&conditions);
                session.location = Some(location.clone());
                session.observed_at = conditions.observed_at;
                session.lookup = LookupState::Success(location.clone());
                info!(
                    observed_at = ?conditions.observed_at,
                    "Loaded weather for {}: {}, {}% humidity, wind {}",
                    location.name,
                    conditions.format_temperature(),
                    conditions.humidity,
                    conditions.format_wind()
                );
                LookupOutcome::Resolved(location)
            }
            Err(e) => {
                warn!("Weather fetch failed for {}: {}", location.name, e);
                Self::fail(&mut session, LookupError::FetchFailed)
            }
        }
    }

    /// Enter `Loading` unless a lookup is already in flight
    async fn begin(session: &Mutex<Session>) -> bool {
        let mut session = session.lock().await;
        if session.lookup.is_busy() {
            warn!("Lookup already in progress, ignoring new request");
            return false;
        }
        session.lookup = LookupState::Loading;
        true
    }

    async fn finish(session: &Mutex<Session>, error: LookupError) -> LookupOutcome {
        let mut session = session.lock().await;
        Self::fail(&mut session, error)
    }

    fn fail(session: &mut Session, error: LookupError) -> LookupOutcome {
        session.lookup = LookupState::from_error(error.clone());
        LookupOutcome::Failed(error)
    }
}
