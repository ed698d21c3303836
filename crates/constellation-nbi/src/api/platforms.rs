//! Platform endpoints (spec §6): Create, Get, List, Update, Delete.
//!
//! GET    /api/platforms        — list platforms
//! POST   /api/platforms        — create platform
//! GET    /api/platforms/{id}   — get platform
//! PUT    /api/platforms/{id}   — update platform
//! DELETE /api/platforms/{id}   — delete platform

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use constellation_core::wire::platform::{self, PlatformWire};

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_platforms).post(create_platform))
        .route(
            "/{id}",
            get(get_platform).put(update_platform).delete(delete_platform),
        )
}

async fn list_platforms(State(state): State<AppState>) -> Json<Vec<PlatformWire>> {
    let platforms = state.scenario.list_platforms();
    Json(platforms.iter().map(platform::to_wire).collect())
}

async fn create_platform(
    State(state): State<AppState>,
    Json(wire): Json<PlatformWire>,
) -> Result<(StatusCode, Json<PlatformWire>), ApiError> {
    let domain = platform::from_wire(&wire);
    let created = state.scenario.create_platform(domain)?;
    tracing::info!(platform_id = %created.id, "platform created");
    Ok((StatusCode::CREATED, Json(platform::to_wire(&created))))
}

async fn get_platform(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlatformWire>, ApiError> {
    let found = state.scenario.get_platform(&id)?;
    Ok(Json(platform::to_wire(&found)))
}

async fn update_platform(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(wire): Json<PlatformWire>,
) -> Result<Json<PlatformWire>, ApiError> {
    let mut domain = platform::from_wire(&wire);
    domain.id = id;
    let updated = state.scenario.update_platform(domain)?;
    Ok(Json(platform::to_wire(&updated)))
}

async fn delete_platform(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.scenario.delete_platform(&id)?;
    tracing::info!(platform_id = %id, "platform deleted");
    Ok(StatusCode::NO_CONTENT)
}
