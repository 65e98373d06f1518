//! Error types and handling for the FeelsLike application

use thiserror::Error;

/// Main error type for the FeelsLike application
#[derive(Error, Debug)]
pub enum FeelsLikeError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl FeelsLikeError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FeelsLikeError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file.")
            }
            FeelsLikeError::Api { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            FeelsLikeError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}

/// Terminal failure of a single location lookup
///
/// Every variant maps to exactly one message shown to the user. None of them
/// is retried automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Geocoding returned no match for the query
    #[error("Location not found: {query}")]
    NotFound { query: String },

    /// The user refused to share their position
    #[error("Location permission denied")]
    PermissionDenied,

    /// The geocoding service could not be reached or answered garbage
    #[error("Geocoding service unavailable")]
    ServiceUnavailable,

    /// The weather service could not be reached or answered garbage
    #[error("Weather fetch failed")]
    FetchFailed,

    /// Any other device geolocation failure
    #[error("Device location unavailable")]
    LocationUnavailable,
}

impl LookupError {
    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            LookupError::NotFound { query } => {
                format!("Could not find a location matching \"{query}\".")
            }
            LookupError::PermissionDenied => {
                "Location access was denied. Allow location access or search for a place instead."
                    .to_string()
            }
            LookupError::ServiceUnavailable => {
                "The location search service is unavailable. Please try again later.".to_string()
            }
            LookupError::FetchFailed => {
                "Unable to fetch weather data. Please try again later.".to_string()
            }
            LookupError::LocationUnavailable => {
                "Unable to access your location. Please search for a place instead.".to_string()
            }
        }
    }
}
