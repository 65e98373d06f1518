//! Values stored in both unit systems at once
//!
//! `Temperature` and `WindSpeed` hold both representations privately. Every
//! constructor and mutator writes one side and derives the other, so the two
//! sides can never drift apart. Deserialization reads only the Celsius (or
//! mph) side and derives the other one.

use serde::{Deserialize, Serialize};

use crate::units::{
    TemperatureUnit, WindUnit, celsius_from_fahrenheit, fahrenheit_from_celsius, kph_from_mph,
    mph_from_kph,
};

/// Serialized form read back into a `Temperature`; `fahrenheit` is ignored
#[derive(Debug, Deserialize)]
struct TemperatureRecord {
    celsius: f64,
}

impl From<TemperatureRecord> for Temperature {
    fn from(record: TemperatureRecord) -> Self {
        Self::from_celsius(record.celsius)
    }
}

/// A temperature known in Celsius and Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "TemperatureRecord")]
pub struct Temperature {
    celsius: f64,
    fahrenheit: f64,
}

impl Temperature {
    #[must_use]
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            celsius,
            fahrenheit: fahrenheit_from_celsius(celsius),
        }
    }

    #[must_use]
    pub fn from_fahrenheit(fahrenheit: f64) -> Self {
        Self {
            celsius: celsius_from_fahrenheit(fahrenheit),
            fahrenheit,
        }
    }

    #[must_use]
    pub fn new(value: f64, unit: TemperatureUnit) -> Self {
        match unit {
            TemperatureUnit::Celsius => Self::from_celsius(value),
            TemperatureUnit::Fahrenheit => Self::from_fahrenheit(value),
        }
    }

    /// Overwrite the value given in `unit` and recompute the other side
    pub fn set(&mut self, value: f64, unit: TemperatureUnit) {
        *self = Self::new(value, unit);
    }

    #[must_use]
    pub const fn celsius(&self) -> f64 {
        self.celsius
    }

    #[must_use]
    pub const fn fahrenheit(&self) -> f64 {
        self.fahrenheit
    }

    #[must_use]
    pub const fn in_unit(&self, unit: TemperatureUnit) -> f64 {
        match unit {
            TemperatureUnit::Celsius => self.celsius,
            TemperatureUnit::Fahrenheit => self.fahrenheit,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WindSpeedRecord {
    mph: f64,
}

impl From<WindSpeedRecord> for WindSpeed {
    fn from(record: WindSpeedRecord) -> Self {
        Self::from_mph(record.mph)
    }
}

/// A wind speed known in mph and kph
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "WindSpeedRecord")]
pub struct WindSpeed {
    mph: f64,
    kph: f64,
}

impl WindSpeed {
    #[must_use]
    pub fn from_mph(mph: f64) -> Self {
        Self {
            mph,
            kph: kph_from_mph(mph),
        }
    }

    #[must_use]
    pub fn from_kph(kph: f64) -> Self {
        Self {
            mph: mph_from_kph(kph),
            kph,
        }
    }

    #[must_use]
    pub fn new(value: f64, unit: WindUnit) -> Self {
        match unit {
            WindUnit::Mph => Self::from_mph(value),
            WindUnit::Kph => Self::from_kph(value),
        }
    }

    /// Overwrite the value given in `unit` and recompute the other side
    pub fn set(&mut self, value: f64, unit: WindUnit) {
        *self = Self::new(value, unit);
    }

    #[must_use]
    pub const fn mph(&self) -> f64 {
        self.mph
    }

    #[must_use]
    pub const fn kph(&self) -> f64 {
        self.kph
    }

    #[must_use]
    pub const fn in_unit(&self, unit: WindUnit) -> f64 {
        match unit {
            WindUnit::Mph => self.mph,
            WindUnit::Kph => self.kph,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_sides_agree() {
        let t = Temperature::from_celsius(24.0);
        assert_eq!(t.celsius(), 24.0);
        assert!((t.fahrenheit() - 75.2).abs() < 1e-9);

        let t = Temperature::from_fahrenheit(75.0);
        assert_eq!(t.fahrenheit(), 75.0);
        assert!((t.celsius() - 23.888_888_888_888_89).abs() < 1e-9);
    }

    #[test]
    fn test_temperature_set_recomputes_other_side() {
        let mut t = Temperature::from_fahrenheit(75.0);
        t.set(-40.0, TemperatureUnit::Celsius);
        assert_eq!(t.celsius(), -40.0);
        assert_eq!(t.fahrenheit(), -40.0);

        t.set(212.0, TemperatureUnit::Fahrenheit);
        assert_eq!(t.in_unit(TemperatureUnit::Fahrenheit), 212.0);
        assert!((t.in_unit(TemperatureUnit::Celsius) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_wind_set_recomputes_other_side() {
        let mut w = WindSpeed::from_mph(5.0);
        assert!((w.kph() - 8.0467).abs() < 1e-9);

        w.set(16.0934, WindUnit::Kph);
        assert_eq!(w.kph(), 16.0934);
        assert!((w.mph() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_serializes_both_sides() {
        let json = serde_json::to_value(WindSpeed::from_mph(10.0)).expect("should serialize");
        assert_eq!(json["mph"], 10.0);
        assert!(json["kph"].as_f64().is_some());
    }

    #[test]
    fn test_deserialize_derives_fahrenheit_from_celsius() {
        let t: Temperature =
            serde_json::from_str(r#"{"celsius": 0.0, "fahrenheit": 100.0}"#).unwrap();
        assert_eq!(t.celsius(), 0.0);
        assert_eq!(t.fahrenheit(), 32.0);
    }

    #[test]
    fn test_deserialize_derives_kph_from_mph() {
        let w: WindSpeed = serde_json::from_str(r#"{"mph": 10.0, "kph": 0.0}"#).unwrap();
        assert_eq!(w.mph(), 10.0);
        assert!((w.kph() - 16.0934).abs() < 1e-9);
    }

    #[test]
    fn test_serialized_value_reads_back_unchanged() {
        let original = Temperature::from_fahrenheit(98.6);
        let json = serde_json::to_string(&original).unwrap();
        let restored: Temperature = serde_json::from_str(&json).unwrap();
        assert!((restored.fahrenheit() - 98.6).abs() < 1e-9);
        assert!((restored.celsius() - original.celsius()).abs() < 1e-12);
    }
}
