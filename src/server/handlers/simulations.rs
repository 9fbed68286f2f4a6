//! Simulation API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use super::super::AppState;
use crate::simulation::SimulationKind;

/// Error body for simulation endpoints.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

fn not_found(message: String) -> Response {
    (StatusCode::NOT_FOUND, Json(ApiError { error: message })).into_response()
}

/// Start a new simulation of the given kind.
pub async fn start_simulation(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Response {
    let Some(kind) = SimulationKind::from_str(&kind) else {
        return not_found(format!("Unknown simulation '{}'", kind));
    };

    let snapshot = state.simulations.start(kind).await;
    tracing::info!("Simulation {} started: {}", snapshot.id, kind);

    (StatusCode::ACCEPTED, Json(snapshot)).into_response()
}

/// Current state and events of a simulation.
pub async fn simulation_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let Ok(uuid) = Uuid::parse_str(&id) else {
        return not_found(format!("Unknown simulation id '{}'", id));
    };

    match state.simulations.snapshot(uuid).await {
        Some(snapshot) => Json(snapshot).into_response(),
        None => not_found(format!("Unknown simulation id '{}'", id)),
    }
}

/// Cancel a running simulation.
pub async fn cancel_simulation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let Ok(uuid) = Uuid::parse_str(&id) else {
        return not_found(format!("Unknown simulation id '{}'", id));
    };

    match state.simulations.cancel(uuid).await {
        Some(snapshot) => {
            tracing::info!("Simulation {} is {}", uuid, snapshot.state.as_str());
            Json(snapshot).into_response()
        }
        None => not_found(format!("Unknown simulation id '{}'", id)),
    }
}
