//! Apparent ("feels like") temperature model
//!
//! Maps air temperature, relative humidity and wind speed to a perceived
//! temperature in the shade, and adds a flat solar load for direct sun.
//!
//! All arithmetic happens in Fahrenheit and mph: the regression constants are
//! Fahrenheit-specific. Conversion to the caller's unit system happens only on
//! the finished value.
//!
//! Below 80°F a simple wind-chill term is used (`T - wind/4`). At and above
//! 80°F, Steadman's simplified heat index is computed first; if it reaches 80°F
//! the full Rothfusz regression with its low- and high-humidity adjustments
//! replaces it. The heat-index branch then subtracts a wind cooling term of
//! `wind/5`. The sub-80 branch does not get that second wind term, which makes
//! the curve jump at exactly 80°F.

use serde::{Deserialize, Serialize};

use crate::models::{Temperature, WindSpeed};

/// Temperature (°F) at which the heat index takes over from wind chill
pub const HEAT_INDEX_THRESHOLD_F: f64 = 80.0;

/// Flat offset (°F) added for direct sun exposure
pub const SOLAR_LOAD_F: f64 = 15.0;

/// Which branch of the model produced a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    /// Below 80°F: `T - wind/4`
    WindChill,
    /// Steadman's simplified heat index stayed below 80°F
    Simplified,
    /// Full Rothfusz regression
    Rothfusz,
}

/// Select the branch for a Fahrenheit temperature and humidity
#[must_use]
pub fn formula_for(temp_f: f64, humidity: f64) -> Formula {
    if temp_f < HEAT_INDEX_THRESHOLD_F {
        Formula::WindChill
    } else if simplified_heat_index(temp_f, humidity) >= HEAT_INDEX_THRESHOLD_F {
        Formula::Rothfusz
    } else {
        Formula::Simplified
    }
}

/// Steadman's simplified heat index
#[must_use]
pub fn simplified_heat_index(temp_f: f64, humidity: f64) -> f64 {
    0.5 * (temp_f + 61.0 + (temp_f - 68.0) * 1.2 + humidity * 0.094)
}

/// Rothfusz regression including the NWS humidity adjustments
#[must_use]
pub fn rothfusz_heat_index(temp_f: f64, humidity: f64) -> f64 {
    let t = temp_f;
    let r = humidity;

    let mut hi = -42.379 + 2.049_015_23 * t + 10.143_331_27 * r
        - 0.224_755_41 * t * r
        - 0.006_837_83 * t * t
        - 0.054_817_17 * r * r
        + 0.001_228_74 * t * t * r
        + 0.000_852_82 * t * r * r
        - 0.000_001_99 * t * t * r * r;

    if r < 13.0 && (80.0..=112.0).contains(&t) {
        hi -= ((13.0 - r) / 4.0) * ((17.0 - (t - 95.0).abs()) / 17.0).sqrt();
    }

    if r > 85.0 && (80.0..=87.0).contains(&t) {
        hi += ((r - 85.0) / 10.0) * ((87.0 - t) / 5.0);
    }

    hi
}

/// Feels-like temperature in the shade, in °F
#[must_use]
pub fn shade_fahrenheit(temp_f: f64, humidity: f64, wind_mph: f64) -> f64 {
    match formula_for(temp_f, humidity) {
        // wind already folded in; no second wind term
        Formula::WindChill => temp_f - wind_mph / 4.0,
        Formula::Simplified => simplified_heat_index(temp_f, humidity) - wind_mph / 5.0,
        Formula::Rothfusz => rothfusz_heat_index(temp_f, humidity) - wind_mph / 5.0,
    }
}

/// Feels-like temperature in direct sun, in °F
#[must_use]
pub fn sun_fahrenheit(temp_f: f64, humidity: f64, wind_mph: f64) -> f64 {
    shade_fahrenheit(temp_f, humidity, wind_mph) + SOLAR_LOAD_F
}

/// Shade and sun feels-like values for one set of inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApparentTemperature {
    pub shade: Temperature,
    pub sun: Temperature,
    pub formula: Formula,
}

impl ApparentTemperature {
    /// Compute both values from dual-unit inputs
    #[must_use]
    pub fn compute(temperature: Temperature, humidity: f64, wind: WindSpeed) -> Self {
        let temp_f = temperature.fahrenheit();
        let shade = shade_fahrenheit(temp_f, humidity, wind.mph());

        Self {
            shade: Temperature::from_fahrenheit(shade),
            sun: Temperature::from_fahrenheit(shade + SOLAR_LOAD_F),
            formula: formula_for(temp_f, humidity),
        }
    }
}
