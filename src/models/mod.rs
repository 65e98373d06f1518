//! Data models for the FeelsLike application
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and display names
//! - Dual unit: Temperature and wind speed kept in both unit systems
//! - Weather: Current conditions as reported by the weather service

pub mod dual_unit;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use dual_unit::{Temperature, WindSpeed};
pub use location::{Coordinates, Location};
pub use weather::CurrentConditions;
