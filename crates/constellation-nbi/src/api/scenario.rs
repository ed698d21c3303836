//! Scenario-wide endpoints (spec §4.6/§6): Clear, Get (snapshot), Load.
//!
//! POST /api/scenario/clear — empty the scenario, reset collaborators
//! GET  /api/scenario       — atomic snapshot, deterministic id-sorted order
//! POST /api/scenario/load  — clear then bulk-insert platforms → nodes →
//!                            links → service requests, in that order

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use constellation_core::wire::link::{self, BidirectionalLinkWire};
use constellation_core::wire::node::{self, NodeWire};
use constellation_core::wire::platform::{self, PlatformWire};
use constellation_core::wire::service_request::{self, ServiceRequestWire};

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_scenario))
        .route("/clear", post(clear_scenario))
        .route("/load", post(load_scenario))
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScenarioPayload {
    pub platforms: Vec<PlatformWire>,
    pub nodes: Vec<NodeWire>,
    pub links: Vec<BidirectionalLinkWire>,
    pub service_requests: Vec<ServiceRequestWire>,
}

async fn get_scenario(State(state): State<AppState>) -> Json<ScenarioPayload> {
    let snapshot = state.scenario.snapshot();

    let mut platforms: Vec<_> = snapshot.platforms.iter().map(platform::to_wire).collect();
    platforms.sort_by(|a, b| a.id.cmp(&b.id));

    let mut nodes: Vec<NodeWire> = snapshot
        .nodes
        .iter()
        .map(|n| {
            let empty = Vec::new();
            let ifaces = snapshot.interfaces_by_node.get(&n.id).unwrap_or(&empty);
            node::to_wire(n, ifaces)
        })
        .collect();
    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    let mut links = pair_and_sort(snapshot.links.clone());
    links.sort_by(|a, b| (&a.a_node_id, &a.b_node_id).cmp(&(&b.a_node_id, &b.b_node_id)));

    let mut service_requests: Vec<_> = snapshot
        .service_requests
        .iter()
        .map(service_request::to_wire)
        .collect();
    service_requests.sort_by(|a, b| a.type_field.cmp(&b.type_field));

    Json(ScenarioPayload {
        platforms,
        nodes,
        links,
        service_requests,
    })
}

fn pair_and_sort(links: Vec<constellation_core::domain::NetworkLink>) -> Vec<BidirectionalLinkWire> {
    use std::collections::HashMap;
    let mut groups: HashMap<String, Vec<constellation_core::domain::NetworkLink>> = HashMap::new();
    for l in links {
        let key = constellation_common::ids::bidirectional_key(&l.a_interface_id, &l.b_interface_id);
        groups.entry(key).or_default().push(l);
    }
    groups
        .into_values()
        .map(|mut group| {
            group.sort_by(|a, b| a.id.cmp(&b.id));
            let forward = group.remove(0);
            let reverse = group.into_iter().next();
            link::to_wire_bidirectional(&forward, reverse.as_ref())
        })
        .collect()
}

async fn clear_scenario(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.scenario.clear_scenario()?;
    tracing::info!("scenario cleared");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct LoadScenarioRequest {
    /// Inline payload. Ignored when `path` is set.
    #[serde(default)]
    pub payload: Option<ScenarioPayload>,
    /// A JSON-encoded scenario file on disk, taking precedence over
    /// `payload` when set (spec §6 — the teacher's corpus has no protobuf
    /// toolchain, so the textproto-path option is realized as a JSON file).
    pub path: Option<String>,
}

async fn load_scenario(
    State(state): State<AppState>,
    Json(req): Json<LoadScenarioRequest>,
) -> Result<StatusCode, ApiError> {
    let payload = match &req.path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| ApiError::bad_request(format!("failed to read {path}: {e}")))?;
            serde_json::from_str::<ScenarioPayload>(&contents)
                .map_err(|e| ApiError::bad_request(format!("failed to parse {path}: {e}")))?
        }
        None => req.payload.unwrap_or_default(),
    };

    if let Err(e) = apply_load(&state, &payload) {
        tracing::warn!(error = %e, "scenario load failed, attempting best-effort clear");
        let _ = state.scenario.clear_scenario();
        return Err(e);
    }
    tracing::info!(
        platforms = payload.platforms.len(),
        nodes = payload.nodes.len(),
        links = payload.links.len(),
        service_requests = payload.service_requests.len(),
        "scenario loaded"
    );
    Ok(StatusCode::NO_CONTENT)
}

fn apply_load(state: &AppState, payload: &ScenarioPayload) -> Result<(), ApiError> {
    state.scenario.clear_scenario()?;

    for wire in &payload.platforms {
        let domain = platform::from_wire(wire);
        state.scenario.create_platform(domain)?;
    }
    for wire in &payload.nodes {
        let (domain_node, domain_ifaces) = node::from_wire(wire)?;
        state.scenario.create_node(domain_node, domain_ifaces)?;
    }
    for wire in &payload.links {
        let (forward, reverse) = link::from_wire_bidirectional(wire)?;
        state.scenario.create_links(vec![forward, reverse])?;
    }
    for wire in &payload.service_requests {
        let domain = service_request::from_wire(wire, None)?;
        state.scenario.create_service_request(domain)?;
    }
    Ok(())
}
