//! Network node endpoints (spec §6): Create, Get, List, Update, Delete, plus
//! a read-only interfaces-for-node listing used by the telemetry surface.
//!
//! GET    /api/nodes                — list nodes
//! POST   /api/nodes                — create node (with interfaces)
//! GET    /api/nodes/{id}           — get node
//! PUT    /api/nodes/{id}           — update node (full interface replace)
//! DELETE /api/nodes/{id}           — delete node
//! GET    /api/nodes/{id}/interfaces — list the node's interfaces

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use constellation_core::wire::interface;
use constellation_core::wire::node::{self, NodeWire};

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_nodes).post(create_node))
        .route(
            "/{id}",
            get(get_node).put(update_node).delete(delete_node),
        )
        .route("/{id}/interfaces", get(list_node_interfaces))
}

async fn list_nodes(State(state): State<AppState>) -> Json<Vec<NodeWire>> {
    let nodes = state.scenario.list_nodes();
    let wires = nodes
        .into_iter()
        .map(|n| {
            let ifaces = state.scenario.list_interfaces_for_node(&n.id).unwrap_or_default();
            node::to_wire(&n, &ifaces)
        })
        .collect();
    Json(wires)
}

async fn create_node(
    State(state): State<AppState>,
    Json(wire): Json<NodeWire>,
) -> Result<(StatusCode, Json<NodeWire>), ApiError> {
    let (domain_node, domain_ifaces) = node::from_wire(&wire)?;
    let (created_node, created_ifaces) = state.scenario.create_node(domain_node, domain_ifaces)?;
    tracing::info!(node_id = %created_node.id, "node created");
    Ok((
        StatusCode::CREATED,
        Json(node::to_wire(&created_node, &created_ifaces)),
    ))
}

async fn get_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NodeWire>, ApiError> {
    let found = state.scenario.get_node(&id)?;
    let ifaces = state.scenario.list_interfaces_for_node(&id)?;
    Ok(Json(node::to_wire(&found, &ifaces)))
}

async fn update_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(wire): Json<NodeWire>,
) -> Result<Json<NodeWire>, ApiError> {
    if wire.id != id {
        return Err(ApiError::bad_request(
            "path id and body id must match for update",
        ));
    }
    let (domain_node, domain_ifaces) = node::from_wire(&wire)?;
    let (updated_node, updated_ifaces) = state.scenario.update_node(domain_node, domain_ifaces)?;
    Ok(Json(node::to_wire(&updated_node, &updated_ifaces)))
}

async fn delete_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.scenario.delete_node(&id)?;
    tracing::info!(node_id = %id, "node deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn list_node_interfaces(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<interface::InterfaceWire>>, ApiError> {
    let ifaces = state.scenario.list_interfaces_for_node(&id)?;
    let node = state.scenario.get_node(&id)?;
    Ok(Json(
        ifaces
            .iter()
            .map(|i| interface::to_wire(i, node.platform_id.clone()))
            .collect(),
    ))
}
