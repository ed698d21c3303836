//! Network link endpoints (spec §6): Create (bidirectional), Get, List,
//! Delete. Storage is directional; the wire shape is always bidirectional,
//! so List/Get pair opposing directional links back into one external view.
//!
//! GET    /api/links      — list links, paired into bidirectional view
//! POST   /api/links      — create a bidirectional link (as two directional halves)
//! GET    /api/links/{id} — get one directional link, paired with its reverse if present
//! DELETE /api/links/{id} — delete one directional link by id

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use constellation_common::ids;
use constellation_core::domain::NetworkLink;
use constellation_core::wire::link::{self, BidirectionalLinkWire};

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_links).post(create_link))
        .route("/{id}", get(get_link).delete(delete_link))
}

/// Groups directional links by their shared bidirectional key and merges
/// each group back into the external shape.
fn pair_into_bidirectional(links: Vec<NetworkLink>) -> Vec<BidirectionalLinkWire> {
    let mut groups: HashMap<String, Vec<NetworkLink>> = HashMap::new();
    for l in links {
        let key = ids::bidirectional_key(&l.a_interface_id, &l.b_interface_id);
        groups.entry(key).or_default().push(l);
    }

    let mut keys: Vec<String> = groups.keys().cloned().collect();
    keys.sort();

    keys.into_iter()
        .map(|key| {
            let mut group = groups.remove(&key).unwrap();
            group.sort_by(|a, b| a.id.cmp(&b.id));
            let forward = group.remove(0);
            let reverse = group.into_iter().next();
            link::to_wire_bidirectional(&forward, reverse.as_ref())
        })
        .collect()
}

async fn list_links(State(state): State<AppState>) -> Json<Vec<BidirectionalLinkWire>> {
    Json(pair_into_bidirectional(state.scenario.list_links()))
}

async fn create_link(
    State(state): State<AppState>,
    Json(wire): Json<BidirectionalLinkWire>,
) -> Result<(StatusCode, Json<BidirectionalLinkWire>), ApiError> {
    let (forward, reverse) = link::from_wire_bidirectional(&wire)?;
    let created = state.scenario.create_links(vec![forward, reverse])?;
    tracing::info!(count = created.len(), "links created");
    Ok((
        StatusCode::CREATED,
        Json(link::to_wire_bidirectional(&created[0], Some(&created[1]))),
    ))
}

async fn get_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BidirectionalLinkWire>, ApiError> {
    let forward = state.scenario.get_link(&id)?;
    let key = ids::bidirectional_key(&forward.a_interface_id, &forward.b_interface_id);
    let reverse = state
        .scenario
        .list_links()
        .into_iter()
        .find(|l| l.id != forward.id && ids::bidirectional_key(&l.a_interface_id, &l.b_interface_id) == key);
    Ok(Json(link::to_wire_bidirectional(&forward, reverse.as_ref())))
}

async fn delete_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.scenario.delete_link(&id)?;
    tracing::info!(link_id = %id, "link deleted");
    Ok(StatusCode::NO_CONTENT)
}
