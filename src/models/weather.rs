//! Current weather conditions as delivered by a weather source

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::units::{TemperatureUnit, WindUnit};

/// A current-conditions reading, expressed in the units it was requested in
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Air temperature in `temperature_unit`
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in `wind_unit`
    pub wind_speed: f64,
    pub temperature_unit: TemperatureUnit,
    pub wind_unit: WindUnit,
    /// Observation time reported by the service, if any
    pub observed_at: Option<DateTime<Utc>>,
}

impl CurrentConditions {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}{}", self.temperature, self.temperature_unit.symbol())
    }

    /// Format wind information
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.1} {}", self.wind_speed, self.wind_unit.symbol())
    }
}
