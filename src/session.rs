//! Interactive session state
//!
//! A session pairs the dual-unit weather inputs with the status of the most
//! recent location lookup. It lives in memory only and is shared behind a
//! `tokio::sync::Mutex`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::apparent_temperature::Formula;
use crate::error::LookupError;
use crate::models::Location;
use crate::state::DualUnitState;
use crate::units::UnitSystem;

/// Session shared between request handlers
pub type SharedSession = Arc<Mutex<Session>>;

/// Progress of a location lookup
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Loading,
    Success(Location),
    NotFound { query: String },
    Failed(LookupError),
}

impl LookupState {
    /// Terminal state for a failed lookup
    #[must_use]
    pub fn from_error(error: LookupError) -> Self {
        match error {
            LookupError::NotFound { query } => Self::NotFound { query },
            other => Self::Failed(other),
        }
    }

    /// The busy flag: set only while a lookup is in flight
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::NotFound { .. } => "not_found",
            Self::Failed(_) => "failed",
        }
    }

    /// Message to show the user, if the last lookup failed
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::NotFound { query } => Some(
                LookupError::NotFound {
                    query: query.clone(),
                }
                .user_message(),
            ),
            Self::Failed(error) => Some(error.user_message()),
            _ => None,
        }
    }
}

/// One user's in-memory session
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub conditions: DualUnitState,
    pub lookup: LookupState,
    /// Most recently resolved place, kept across later failed lookups
    pub location: Option<Location>,
    /// Observation time of the last applied weather reading
    pub observed_at: Option<DateTime<Utc>>,
}

impl Session {
    #[must_use]
    pub fn new(units: UnitSystem) -> Self {
        Self {
            conditions: DualUnitState::with_units(units),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn shared(units: UnitSystem) -> SharedSession {
        Arc::new(Mutex::new(Self::new(units)))
    }

    /// Read-only view for the presentation layer
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(self)
    }
}

/// A value in the active unit with its symbol
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayValue {
    pub value: f64,
    pub unit: &'static str,
}

/// Lookup status as seen by the presentation layer
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LookupSnapshot {
    pub state: &'static str,
    pub busy: bool,
    pub error: Option<String>,
    pub location: Option<Location>,
    pub observed_at: Option<DateTime<Utc>>,
}

/// Everything the presentation layer reads, computed from current state
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionSnapshot {
    pub units: UnitSystem,
    pub temperature: DisplayValue,
    pub temperature_celsius: f64,
    pub temperature_fahrenheit: f64,
    pub humidity: f64,
    pub wind: DisplayValue,
    pub wind_mph: f64,
    pub wind_kph: f64,
    pub feels_like_shade: DisplayValue,
    pub feels_like_sun: DisplayValue,
    pub feels_like_shade_fahrenheit: f64,
    pub feels_like_sun_fahrenheit: f64,
    pub formula: Formula,
    pub lookup: LookupSnapshot,
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        let state = &session.conditions;
        let units = state.unit_system();
        let temperature_unit = units.temperature_unit();
        let wind_unit = units.wind_unit();
        let apparent = state.apparent();

        Self {
            units,
            temperature: DisplayValue {
                value: state.native_temperature(),
                unit: temperature_unit.symbol(),
            },
            temperature_celsius: state.temperature().celsius(),
            temperature_fahrenheit: state.temperature().fahrenheit(),
            humidity: state.humidity(),
            wind: DisplayValue {
                value: state.native_wind(),
                unit: wind_unit.symbol(),
            },
            wind_mph: state.wind().mph(),
            wind_kph: state.wind().kph(),
            feels_like_shade: DisplayValue {
                value: apparent.shade.in_unit(temperature_unit),
                unit: temperature_unit.symbol(),
            },
            feels_like_sun: DisplayValue {
                value: apparent.sun.in_unit(temperature_unit),
                unit: temperature_unit.symbol(),
            },
            feels_like_shade_fahrenheit: apparent.shade.fahrenheit(),
            feels_like_sun_fahrenheit: apparent.sun.fahrenheit(),
            formula: apparent.formula,
            lookup: LookupSnapshot {
                state: session.lookup.name(),
                busy: session.lookup.is_busy(),
                error: session.lookup.error_message(),
                location: session.location.clone(),
                observed_at: session.observed_at,
            },
        }
    }
}
