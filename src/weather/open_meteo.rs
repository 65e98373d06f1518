//! Open-Meteo weather client
//!
//! HTTP client for the Open-Meteo forecast endpoint, asking only for the
//! current block. No API key required.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::{WeatherError, WeatherRequest, WeatherSource};
use crate::config::WeatherConfig;
use crate::models::CurrentConditions;

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m";

/// Forecast response; only the `current` block is read
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentData>,
}

#[derive(Debug, Deserialize)]
struct CurrentData {
    time: Option<String>,
    temperature_2m: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
}

/// Open-Meteo HTTP client implementation
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .build()
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_current_url(&self, request: &WeatherRequest) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&current={}&temperature_unit={}&wind_speed_unit={}&timezone=UTC",
            self.base_url,
            request.coordinates.latitude,
            request.coordinates.longitude,
            CURRENT_FIELDS,
            request.temperature_unit.api_name(),
            request.wind_unit.api_name()
        )
    }

    /// Parse the `current.time` field; Open-Meteo omits seconds
    fn parse_time(s: &str) -> Option<DateTime<Utc>> {
        chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
            .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
            .ok()
            .map(|dt| Utc.from_utc_datetime(&dt))
    }

    fn parse_current(data: &CurrentData, request: &WeatherRequest) -> CurrentConditions {
        CurrentConditions {
            temperature: data.temperature_2m,
            humidity: data.relative_humidity_2m,
            wind_speed: data.wind_speed_10m,
            temperature_unit: request.temperature_unit,
            wind_unit: request.wind_unit,
            observed_at: data.time.as_deref().and_then(Self::parse_time),
        }
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = %request.coordinates.latitude, lon = %request.coordinates.longitude))]
    async fn current(&self, request: &WeatherRequest) -> Result<CurrentConditions, WeatherError> {
        if !request.coordinates.is_valid() {
            return Err(WeatherError::InvalidCoordinates);
        }

        let url = self.build_current_url(request);
        debug!(url = %url, "Fetching current weather");
        let start_time = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let current = body.current.ok_or_else(|| {
            WeatherError::ParseError("No current weather data in response".to_string())
        })?;

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved current weather in {:.3}s",
            total_duration.as_secs_f64()
        );
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow API response detected: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(Self::parse_current(&current, request))
    }
}
