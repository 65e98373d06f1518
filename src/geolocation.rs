//! Device geolocation
//!
//! The position of the user's device is only known to the browser. The
//! presentation layer forwards whatever the browser's geolocation API reported
//! (a position or an error code) and `ReportedPosition` replays it to the
//! resolver through the `GeolocationProvider` seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Coordinates;

/// Why a device position could not be obtained
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Position unavailable")]
    PositionUnavailable,

    #[error("Location request timed out")]
    Timeout,

    #[error("Geolocation is not supported")]
    Unsupported,
}

/// Device geolocation collaborator
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// A position (or failure) already reported by the client device
#[derive(Debug, Clone, PartialEq)]
pub struct ReportedPosition(Result<Coordinates, GeolocationError>);

impl ReportedPosition {
    #[must_use]
    pub const fn located(coordinates: Coordinates) -> Self {
        Self(Ok(coordinates))
    }

    #[must_use]
    pub const fn failed(error: GeolocationError) -> Self {
        Self(Err(error))
    }
}

#[async_trait]
impl GeolocationProvider for ReportedPosition {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_deserialize() {
        assert_eq!(
            serde_json::from_str::<GeolocationError>(r#""permission_denied""#).unwrap(),
            GeolocationError::PermissionDenied
        );
        assert_eq!(
            serde_json::from_str::<GeolocationError>(r#""position_unavailable""#).unwrap(),
            GeolocationError::PositionUnavailable
        );
        assert!(serde_json::from_str::<GeolocationError>(r#""bogus""#).is_err());
    }

    #[tokio::test]
    async fn test_reported_position_replays() {
        let position = ReportedPosition::located(Coordinates::new(1.5, 2.5));
        assert_eq!(
            position.current_position().await,
            Ok(Coordinates::new(1.5, 2.5))
        );

        let denied = ReportedPosition::failed(GeolocationError::PermissionDenied);
        assert_eq!(
            denied.current_position().await,
            Err(GeolocationError::PermissionDenied)
        );
    }
}
