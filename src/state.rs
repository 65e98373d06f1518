//! Dual-unit weather state
//!
//! Single source of truth for the inputs of the feels-like model. Temperature
//! and wind are stored as dual-unit values, humidity as a plain percentage. The
//! active unit system only decides which side manual edits and weather requests
//! use; switching it never changes a stored value.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::apparent_temperature::ApparentTemperature;
use crate::models::{CurrentConditions, Temperature, WindSpeed};
use crate::units::{TemperatureUnit, UnitSystem, WindUnit};

/// Default air temperature (°F) for a new session
pub const DEFAULT_TEMPERATURE_F: f64 = 75.0;
/// Default relative humidity (%) for a new session
pub const DEFAULT_HUMIDITY: f64 = 60.0;
/// Default wind speed (mph) for a new session
pub const DEFAULT_WIND_MPH: f64 = 5.0;

/// Temperature, humidity and wind kept consistent across unit systems
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DualUnitState {
    temperature: Temperature,
    humidity: f64,
    wind: WindSpeed,
    units: UnitSystem,
}

impl Default for DualUnitState {
    fn default() -> Self {
        Self {
            temperature: Temperature::from_fahrenheit(DEFAULT_TEMPERATURE_F),
            humidity: DEFAULT_HUMIDITY,
            wind: WindSpeed::from_mph(DEFAULT_WIND_MPH),
            units: UnitSystem::Imperial,
        }
    }
}

impl DualUnitState {
    /// Default state displayed in `units`
    #[must_use]
    pub fn with_units(units: UnitSystem) -> Self {
        Self {
            units,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn temperature(&self) -> Temperature {
        self.temperature
    }

    #[must_use]
    pub const fn humidity(&self) -> f64 {
        self.humidity
    }

    #[must_use]
    pub const fn wind(&self) -> WindSpeed {
        self.wind
    }

    #[must_use]
    pub const fn unit_system(&self) -> UnitSystem {
        self.units
    }

    /// Temperature in the active unit system
    #[must_use]
    pub fn native_temperature(&self) -> f64 {
        self.temperature.in_unit(self.units.temperature_unit())
    }

    /// Wind speed in the active unit system
    #[must_use]
    pub fn native_wind(&self) -> f64 {
        self.wind.in_unit(self.units.wind_unit())
    }

    pub fn set_temperature(&mut self, value: f64, unit: TemperatureUnit) {
        self.temperature.set(value, unit);
    }

    /// Set temperature from a value in the active unit system
    pub fn set_temperature_native(&mut self, value: f64) {
        self.set_temperature(value, self.units.temperature_unit());
    }

    pub fn set_wind(&mut self, value: f64, unit: WindUnit) {
        self.wind.set(value, unit);
    }

    /// Set wind speed from a value in the active unit system
    pub fn set_wind_native(&mut self, value: f64) {
        self.set_wind(value, self.units.wind_unit());
    }

    pub fn set_humidity(&mut self, value: f64) {
        self.humidity = value;
    }

    pub fn set_unit_system(&mut self, units: UnitSystem) {
        self.units = units;
    }

    /// Write a weather reading, native side first, in the units it was fetched in
    pub fn apply_conditions(&mut self, conditions: &CurrentConditions) {
        debug!(
            temperature = conditions.temperature,
            humidity = conditions.humidity,
            wind = conditions.wind_speed,
            "Applying weather reading"
        );
        self.set_temperature(conditions.temperature, conditions.temperature_unit);
        self.set_humidity(conditions.humidity);
        self.set_wind(conditions.wind_speed, conditions.wind_unit);
    }

    /// Feels-like values for the current inputs, recomputed on every call
    #[must_use]
    pub fn apparent(&self) -> ApparentTemperature {
        ApparentTemperature::compute(self.temperature, self.humidity, self.wind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{celsius_from_fahrenheit, fahrenheit_from_celsius, kph_from_mph, mph_from_kph};

    #[test]
    fn test_defaults() {
        let state = DualUnitState::default();
        assert_eq!(state.unit_system(), UnitSystem::Imperial);
        assert_eq!(state.temperature().fahrenheit(), 75.0);
        assert!((state.temperature().celsius() - celsius_from_fahrenheit(75.0)).abs() < 1e-9);
        assert_eq!(state.humidity(), 60.0);
        assert_eq!(state.wind().mph(), 5.0);
        assert!((state.wind().kph() - 8.0467).abs() < 1e-9);
    }

    #[test]
    fn test_set_celsius_then_read_fahrenheit() {
        let mut state = DualUnitState::default();
        state.set_temperature(31.5, TemperatureUnit::Celsius);
        assert_eq!(state.temperature().celsius(), 31.5);
        assert_eq!(state.temperature().fahrenheit(), fahrenheit_from_celsius(31.5));
    }

    #[test]
    fn test_set_fahrenheit_then_read_celsius() {
        let mut state = DualUnitState::default();
        state.set_temperature(88.0, TemperatureUnit::Fahrenheit);
        assert_eq!(state.temperature().celsius(), celsius_from_fahrenheit(88.0));
    }

    #[test]
    fn test_set_wind_both_directions() {
        let mut state = DualUnitState::default();
        state.set_wind(20.0, WindUnit::Kph);
        assert_eq!(state.wind().mph(), mph_from_kph(20.0));

        state.set_wind(12.0, WindUnit::Mph);
        assert_eq!(state.wind().kph(), kph_from_mph(12.0));
    }

    #[test]
    fn test_native_setters_follow_active_units() {
        let mut state = DualUnitState::with_units(UnitSystem::Metric);
        state.set_temperature_native(30.0);
        state.set_wind_native(10.0);
        assert_eq!(state.temperature().celsius(), 30.0);
        assert_eq!(state.wind().kph(), 10.0);
        assert_eq!(state.native_temperature(), 30.0);
        assert_eq!(state.native_wind(), 10.0);
    }

    #[test]
    fn test_switching_units_keeps_physical_values() {
        let mut state = DualUnitState::default();
        state.set_temperature(27.0, TemperatureUnit::Celsius);
        let before = state.temperature();
        let wind_before = state.wind();

        state.set_unit_system(UnitSystem::Metric);
        assert_eq!(state.temperature(), before);
        assert_eq!(state.wind(), wind_before);
        assert_eq!(state.native_temperature(), 27.0);

        state.set_unit_system(UnitSystem::Imperial);
        assert_eq!(state.temperature().celsius(), 27.0);
    }

    #[test]
    fn test_humidity_is_not_clamped() {
        let mut state = DualUnitState::default();
        state.set_humidity(140.0);
        assert_eq!(state.humidity(), 140.0);
        state.set_humidity(-5.0);
        assert_eq!(state.humidity(), -5.0);
    }

    #[test]
    fn test_apply_metric_conditions() {
        let mut state = DualUnitState::default();
        state.apply_conditions(&CurrentConditions {
            temperature: 32.0,
            humidity: 45.0,
            wind_speed: 18.0,
            temperature_unit: TemperatureUnit::Celsius,
            wind_unit: WindUnit::Kph,
            observed_at: None,
        });
        assert_eq!(state.temperature().celsius(), 32.0);
        assert_eq!(state.temperature().fahrenheit(), fahrenheit_from_celsius(32.0));
        assert_eq!(state.humidity(), 45.0);
        assert_eq!(state.wind().kph(), 18.0);
    }

    #[test]
    fn test_apparent_tracks_mutations() {
        let mut state = DualUnitState::default();
        let first = state.apparent();
        assert!((first.shade.fahrenheit() - 73.75).abs() < 1e-9);

        state.set_temperature(90.0, TemperatureUnit::Fahrenheit);
        state.set_humidity(50.0);
        state.set_wind(0.0, WindUnit::Mph);
        let second = state.apparent();
        assert!((second.shade.fahrenheit() - 94.596_941_2).abs() < 1e-6);
        assert!((second.sun.fahrenheit() - 109.596_941_2).abs() < 1e-6);
    }

    #[test]
    fn test_deserialized_state_keeps_pairs_consistent() {
        let state: DualUnitState = serde_json::from_str(
            r#"{
                "temperature": {"celsius": 40.0, "fahrenheit": 50.0},
                "humidity": 20.0,
                "wind": {"mph": 0.0, "kph": 99.0},
                "units": "metric"
            }"#,
        )
        .unwrap();

        assert_eq!(state.native_temperature(), 40.0);
        assert!((state.temperature().fahrenheit() - 104.0).abs() < 1e-9);
        assert_eq!(state.native_wind(), 0.0);

        let apparent = state.apparent();
        assert_eq!(apparent.formula, crate::apparent_temperature::Formula::Rothfusz);
        assert!(apparent.shade.celsius() > 35.0);
    }
}
