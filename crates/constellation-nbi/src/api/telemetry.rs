//! Read-only telemetry endpoint (spec §6): per-interface metrics, with
//! optional node-id / interface-id filters.
//!
//! GET /api/telemetry/interfaces?node_id=...&interface_id=...

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/interfaces", get(list_interface_metrics))
}

#[derive(Debug, Deserialize)]
struct InterfaceMetricsQuery {
    node_id: Option<String>,
    interface_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct InterfaceMetric {
    interface_id: String,
    parent_node_id: String,
    medium: String,
    operational: bool,
    link_count: usize,
    available_bandwidth_bps: u64,
}

async fn list_interface_metrics(
    State(state): State<AppState>,
    Query(q): Query<InterfaceMetricsQuery>,
) -> Json<Vec<InterfaceMetric>> {
    let snapshot = state.scenario.snapshot();
    let links = state.scenario.list_links();

    let metrics = snapshot
        .interfaces
        .iter()
        .filter(|i| q.node_id.as_deref().map(|n| n == i.parent_node_id).unwrap_or(true))
        .filter(|i| q.interface_id.as_deref().map(|id| id == i.id).unwrap_or(true))
        .map(|i| {
            let available_bandwidth_bps = links
                .iter()
                .filter(|l| i.link_ids.contains(&l.id))
                .map(|l| l.available_bandwidth_bps)
                .sum();
            InterfaceMetric {
                interface_id: i.id.clone(),
                parent_node_id: i.parent_node_id.clone(),
                medium: i.medium.as_wire_str().to_string(),
                operational: i.operational,
                link_count: i.link_ids.len(),
                available_bandwidth_bps,
            }
        })
        .collect();

    Json(metrics)
}
