//! Weather collaborator
//!
//! A `WeatherSource` answers one question: the current temperature, relative
//! humidity and wind speed at a coordinate pair, in the units asked for.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Coordinates, CurrentConditions};
use crate::units::{TemperatureUnit, UnitSystem, WindUnit};

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,
}

/// Parameters of a current-conditions request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherRequest {
    pub coordinates: Coordinates,
    pub temperature_unit: TemperatureUnit,
    pub wind_unit: WindUnit,
}

impl WeatherRequest {
    /// Request in the native units of `units`
    #[must_use]
    pub const fn native(coordinates: Coordinates, units: UnitSystem) -> Self {
        Self {
            coordinates,
            temperature_unit: units.temperature_unit(),
            wind_unit: units.wind_unit(),
        }
    }
}

/// Weather data collaborator
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Current conditions at the requested coordinates
    async fn current(&self, request: &WeatherRequest) -> Result<CurrentConditions, WeatherError>;
}
