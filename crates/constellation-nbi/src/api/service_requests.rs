//! Service request endpoints (spec §6): Create, Get, List, Update, Delete.
//!
//! GET    /api/service-requests        — list service requests
//! POST   /api/service-requests        — create (id generated if absent)
//! GET    /api/service-requests/{id}   — get
//! PUT    /api/service-requests/{id}   — update (id preserved from path)
//! DELETE /api/service-requests/{id}   — delete

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use constellation_core::wire::service_request::{self, ServiceRequestWire};

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_service_requests).post(create_service_request))
        .route(
            "/{id}",
            get(get_service_request)
                .put(update_service_request)
                .delete(delete_service_request),
        )
}

async fn list_service_requests(State(state): State<AppState>) -> Json<Vec<ServiceRequestWire>> {
    let srs = state.scenario.list_service_requests();
    Json(srs.iter().map(service_request::to_wire).collect())
}

async fn create_service_request(
    State(state): State<AppState>,
    Json(wire): Json<ServiceRequestWire>,
) -> Result<(StatusCode, Json<ServiceRequestWire>), ApiError> {
    let domain = service_request::from_wire(&wire, None)?;
    let created = state.scenario.create_service_request(domain)?;
    tracing::info!(service_request_id = %created.id, "service request created");
    Ok((StatusCode::CREATED, Json(service_request::to_wire(&created))))
}

async fn get_service_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ServiceRequestWire>, ApiError> {
    let found = state.scenario.get_service_request(&id)?;
    Ok(Json(service_request::to_wire(&found)))
}

async fn update_service_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(wire): Json<ServiceRequestWire>,
) -> Result<Json<ServiceRequestWire>, ApiError> {
    let domain = service_request::from_wire(&wire, Some(&id))?;
    let updated = state.scenario.update_service_request(domain)?;
    Ok(Json(service_request::to_wire(&updated)))
}

async fn delete_service_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.scenario.delete_service_request(&id)?;
    tracing::info!(service_request_id = %id, "service request deleted");
    Ok(StatusCode::NO_CONTENT)
}
