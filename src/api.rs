//! JSON API consumed by the browser frontend
//!
//! Every endpoint answers with the full `SessionSnapshot` so the page can
//! re-render from a single response. Lookups run on their own task: a client
//! that disconnects mid-request cannot leave the session stuck in `Loading`.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::error;

use crate::geolocation::{GeolocationError, ReportedPosition};
use crate::location_resolver::{LocationResolver, LookupOutcome};
use crate::models::Coordinates;
use crate::session::{SessionSnapshot, SharedSession};
use crate::units::{TemperatureUnit, UnitSystem, WindUnit};

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub session: SharedSession,
    pub resolver: Arc<LocationResolver>,
}

impl AppState {
    pub fn new(session: SharedSession, resolver: LocationResolver) -> Self {
        Self {
            session,
            resolver: Arc::new(resolver),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TemperatureUpdate {
    pub value: f64,
    /// Defaults to the active system's unit
    pub unit: Option<TemperatureUnit>,
}

#[derive(Debug, Deserialize)]
pub struct WindUpdate {
    pub value: f64,
    pub unit: Option<WindUnit>,
}

#[derive(Debug, Deserialize)]
pub struct HumidityUpdate {
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub struct UnitsUpdate {
    pub units: UnitSystem,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// What the browser's geolocation API reported
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GeolocateRequest {
    Position { latitude: f64, longitude: f64 },
    Failure { error: GeolocationError },
}

impl From<GeolocateRequest> for ReportedPosition {
    fn from(request: GeolocateRequest) -> Self {
        match request {
            GeolocateRequest::Position {
                latitude,
                longitude,
            } => Self::located(Coordinates::new(latitude, longitude)),
            GeolocateRequest::Failure { error } => Self::failed(error),
        }
    }
}

type SnapshotResponse = Result<(StatusCode, Json<SessionSnapshot>), StatusCode>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/state", get(get_state))
        .route("/temperature", post(set_temperature))
        .route("/wind", post(set_wind))
        .route("/humidity", post(set_humidity))
        .route("/units", post(set_units))
        .route("/search", post(search))
        .route("/geolocate", post(geolocate))
        .with_state(state)
}

async fn snapshot(state: &AppState) -> Json<SessionSnapshot> {
    Json(state.session.lock().await.snapshot())
}

async fn get_state(State(state): State<AppState>) -> Json<SessionSnapshot> {
    snapshot(&state).await
}

async fn set_temperature(
    State(state): State<AppState>,
    Json(update): Json<TemperatureUpdate>,
) -> Json<SessionSnapshot> {
    {
        let mut session = state.session.lock().await;
        match update.unit {
            Some(unit) => session.conditions.set_temperature(update.value, unit),
            None => session.conditions.set_temperature_native(update.value),
        }
    }
    snapshot(&state).await
}

async fn set_wind(
    State(state): State<AppState>,
    Json(update): Json<WindUpdate>,
) -> Json<SessionSnapshot> {
    {
        let mut session = state.session.lock().await;
        match update.unit {
            Some(unit) => session.conditions.set_wind(update.value, unit),
            None => session.conditions.set_wind_native(update.value),
        }
    }
    snapshot(&state).await
}

async fn set_humidity(
    State(state): State<AppState>,
    Json(update): Json<HumidityUpdate>,
) -> Json<SessionSnapshot> {
    state
        .session
        .lock()
        .await
        .conditions
        .set_humidity(update.value);
    snapshot(&state).await
}

async fn set_units(
    State(state): State<AppState>,
    Json(update): Json<UnitsUpdate>,
) -> Json<SessionSnapshot> {
    state
        .session
        .lock()
        .await
        .conditions
        .set_unit_system(update.units);
    snapshot(&state).await
}

async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> SnapshotResponse {
    let resolver = Arc::clone(&state.resolver);
    let session = Arc::clone(&state.session);
    let task = tokio::spawn(async move { resolver.search(&session, &request.query).await });

    finish_lookup(&state, task).await
}

async fn geolocate(
    State(state): State<AppState>,
    Json(request): Json<GeolocateRequest>,
) -> SnapshotResponse {
    let resolver = Arc::clone(&state.resolver);
    let session = Arc::clone(&state.session);
    let position = ReportedPosition::from(request);
    let task = tokio::spawn(async move { resolver.locate(&session, &position).await });

    finish_lookup(&state, task).await
}

/// Wait for a lookup task; a lookup ignored because another one is loading answers 409
async fn finish_lookup(
    state: &AppState,
    task: tokio::task::JoinHandle<LookupOutcome>,
) -> SnapshotResponse {
    let outcome = task.await.map_err(|e| {
        error!("Lookup task failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let status = match outcome {
        LookupOutcome::Ignored => StatusCode::CONFLICT,
        _ => StatusCode::OK,
    };

    Ok((status, snapshot(state).await))
}
