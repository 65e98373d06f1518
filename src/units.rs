//! Unit systems and conversions
//!
//! Plain conversion functions between Celsius/Fahrenheit and mph/kph, and the
//! two unit systems a session can display. Inputs are not validated; any finite
//! (or non-finite) number converts arithmetically.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kilometres per hour in one mile per hour
pub const KPH_PER_MPH: f64 = 1.60934;

/// Unit system used for display and for weather API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Fahrenheit and miles per hour
    #[default]
    Imperial,
    /// Celsius and kilometres per hour
    Metric,
}

impl UnitSystem {
    /// Native temperature unit of this system
    #[must_use]
    pub const fn temperature_unit(self) -> TemperatureUnit {
        match self {
            Self::Imperial => TemperatureUnit::Fahrenheit,
            Self::Metric => TemperatureUnit::Celsius,
        }
    }

    /// Native wind speed unit of this system
    #[must_use]
    pub const fn wind_unit(self) -> WindUnit {
        match self {
            Self::Imperial => WindUnit::Mph,
            Self::Metric => WindUnit::Kph,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Imperial => "imperial",
            Self::Metric => "metric",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "imperial" => Ok(Self::Imperial),
            "metric" => Ok(Self::Metric),
            other => Err(format!(
                "Unknown unit system '{other}'. Must be one of: imperial, metric"
            )),
        }
    }
}

/// Temperature unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Parameter value understood by the weather API
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

/// Wind speed unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindUnit {
    Mph,
    Kph,
}

impl WindUnit {
    /// Parameter value understood by the weather API
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::Mph => "mph",
            Self::Kph => "kmh",
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Mph => "mph",
            Self::Kph => "km/h",
        }
    }
}

#[must_use]
pub fn celsius_from_fahrenheit(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

#[must_use]
pub fn fahrenheit_from_celsius(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

#[must_use]
pub fn kph_from_mph(mph: f64) -> f64 {
    mph * KPH_PER_MPH
}

#[must_use]
pub fn mph_from_kph(kph: f64) -> f64 {
    kph / KPH_PER_MPH
}

/// Convert a temperature between units
#[must_use]
pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    match (from, to) {
        (TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit) => fahrenheit_from_celsius(value),
        (TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius) => celsius_from_fahrenheit(value),
        _ => value,
    }
}

/// Convert a wind speed between units
#[must_use]
pub fn convert_wind(value: f64, from: WindUnit, to: WindUnit) -> f64 {
    match (from, to) {
        (WindUnit::Mph, WindUnit::Kph) => kph_from_mph(value),
        (WindUnit::Kph, WindUnit::Mph) => mph_from_kph(value),
        _ => value,
    }
}
