//! `FeelsLike` - weather lookup and feels-like temperature estimation
//!
//! This library resolves a place or device position to current weather and
//! derives how hot or cold it feels in the shade and in direct sun, keeping
//! every value consistent across imperial and metric units.

pub mod api;
pub mod apparent_temperature;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod geolocation;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod session;
pub mod state;
pub mod units;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use apparent_temperature::{ApparentTemperature, Formula};
pub use config::FeelsLikeConfig;
pub use error::{FeelsLikeError, LookupError};
pub use geocoding::{Geocoder, NominatimGeocoder};
pub use geolocation::{GeolocationError, GeolocationProvider, ReportedPosition};
pub use location_resolver::{LocationInput, LocationResolver, LookupOutcome};
pub use models::{Coordinates, CurrentConditions, Location, Temperature, WindSpeed};
pub use session::{LookupState, Session, SessionSnapshot, SharedSession};
pub use state::DualUnitState;
pub use units::{TemperatureUnit, UnitSystem, WindUnit};
pub use weather::{OpenMeteoClient, WeatherRequest, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
