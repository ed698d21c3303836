//! End-to-end API tests exercised through axum's tower service interface
//! (no TCP), grounded on strata-control's `tests/api_integration.rs` shape.

use std::sync::{Arc, Weak};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use constellation_core::domain::Platform;
use constellation_core::error::CoreResult;
use constellation_core::{ConnectivityService, MotionModel, NoopMetrics, ScenarioState};
use constellation_nbi::{api, state::AppState};

/// Does nothing on every call. Positions only move via direct `PUT`s in
/// tests, never via a motion collaborator.
struct StillMotion;

impl MotionModel for StillMotion {
    fn add_platform(&self, _platform: &Platform) -> CoreResult<()> {
        Ok(())
    }
    fn remove_platform(&self, _id: &str) -> CoreResult<()> {
        Ok(())
    }
    fn update_positions(&self, _now: DateTime<Utc>) -> CoreResult<()> {
        Ok(())
    }
}

/// Activates a wireless link when its endpoint nodes are within
/// `range_km`, deactivates otherwise — the same rule as
/// `constellation_sim::RangeConnectivity`, reimplemented here so tests stay
/// independent of that crate's seeded randomness.
struct ThresholdConnectivity {
    state: Weak<ScenarioState>,
    range_km: f64,
}

impl ConnectivityService for ThresholdConnectivity {
    fn update_connectivity(&self) -> CoreResult<()> {
        let Some(state) = self.state.upgrade() else {
            return Ok(());
        };
        for link in state.list_links() {
            if link.medium != constellation_core::domain::Medium::Wireless {
                continue;
            }
            let Some((a_node, _)) =
                constellation_common::ids::split_interface_id(&link.a_interface_id)
            else {
                continue;
            };
            let Some((b_node, _)) =
                constellation_common::ids::split_interface_id(&link.b_interface_id)
            else {
                continue;
            };
            let (Some(a_pos), Some(b_pos)) = (
                state.node_ecef_position_km(a_node),
                state.node_ecef_position_km(b_node),
            ) else {
                continue;
            };
            if a_pos.distance_to(b_pos) <= self.range_km {
                state.activate_link(&link.id)?;
            } else {
                state.deactivate_link(&link.id)?;
            }
        }
        Ok(())
    }
}

fn test_app() -> (Router, Arc<ScenarioState>) {
    let scenario = Arc::new_cyclic(|weak: &Weak<ScenarioState>| {
        let motion = Arc::new(StillMotion);
        let connectivity = Arc::new(ThresholdConnectivity {
            state: weak.clone(),
            range_km: 3_000.0,
        });
        ScenarioState::new(motion, connectivity).with_metrics(Arc::new(NoopMetrics))
    });
    let state = AppState::new(scenario.clone());
    let app = Router::new().nest("/api", api::router()).with_state(state);
    (app, scenario)
}

fn json_req(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().uri(uri).method(method);
    match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&b).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        let text = String::from_utf8_lossy(&bytes);
        panic!("not valid JSON: {text}");
    })
}

fn platform_wire(id: &str, name: &str, ptype: &str, motion_source: &str, x: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "platform_type": ptype,
        "category": null,
        "norad_id": null,
        "motion_source": motion_source,
        "x": x,
        "y": 0.0,
        "z": 0.0
    })
}

fn node_wire(id: &str, name: &str, iface_local: &str, platform_id: &str, trx: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "node_type": "ROUTER",
        "country_code": null,
        "interfaces": [{
            "interface_id": iface_local,
            "medium": "WIRELESS",
            "transceiver_id": trx,
            "mac": null,
            "ip": null,
            "platform_id": platform_id,
            "impairments": []
        }]
    })
}

fn wired_node_wire(id: &str, name: &str, iface_local: &str, platform_id: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "node_type": "ROUTER",
        "country_code": null,
        "interfaces": [{
            "interface_id": iface_local,
            "medium": "WIRED",
            "transceiver_id": null,
            "mac": null,
            "ip": null,
            "platform_id": platform_id,
            "impairments": []
        }]
    })
}

fn bidi_link_wire(a_node: &str, a_if: &str, b_node: &str, b_if: &str) -> Value {
    bidi_link_wire_medium(a_node, a_if, b_node, b_if, "WIRELESS")
}

fn bidi_link_wire_medium(a_node: &str, a_if: &str, b_node: &str, b_if: &str, medium: &str) -> Value {
    json!({
        "a_node_id": a_node,
        "b_node_id": b_node,
        "a_tx_interface_id": a_if,
        "a_rx_interface_id": null,
        "b_tx_interface_id": b_if,
        "b_rx_interface_id": null,
        "medium": medium,
        "max_bandwidth_bps": 1_000_000
    })
}

#[tokio::test]
async fn create_then_snapshot() {
    let (app, _scenario) = test_app();

    let resp = app
        .clone()
        .oneshot(json_req(
            "POST",
            "/api/platforms",
            Some(platform_wire("p1", "p1", "GROUND_STATION", "UNKNOWN", 6_371_000.0)),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(json_req(
            "POST",
            "/api/platforms",
            Some(platform_wire("p2", "p2", "SATELLITE", "SPACETRACK", 6_871_000.0)),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(json_req(
            "POST",
            "/api/nodes",
            Some(node_wire("n1", "n1", "if1", "p1", "trx-ku")),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(json_req(
            "POST",
            "/api/nodes",
            Some(node_wire("n2", "n2", "if2", "p2", "trx-ku")),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(json_req(
            "POST",
            "/api/links",
            Some(bidi_link_wire("n1", "if1", "n2", "if2")),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(json_req("GET", "/api/scenario", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let snapshot = json_body(resp).await;
    assert_eq!(snapshot["platforms"].as_array().unwrap().len(), 2);
    assert_eq!(snapshot["nodes"].as_array().unwrap().len(), 2);
    assert_eq!(snapshot["links"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn referential_integrity_deletes() {
    let (app, _scenario) = test_app();

    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/platforms",
            Some(platform_wire("p1", "p1", "GROUND_STATION", "UNKNOWN", 6_371_000.0)),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/platforms",
            Some(platform_wire("p2", "p2", "SATELLITE", "SPACETRACK", 6_871_000.0)),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/nodes",
            Some(node_wire("n1", "n1", "if1", "p1", "trx-ku")),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/nodes",
            Some(node_wire("n2", "n2", "if2", "p2", "trx-ku")),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/links",
            Some(bidi_link_wire("n1", "if1", "n2", "if2")),
        ))
        .await
        .unwrap();

    // DeletePlatform(p1) fails: p1 is still referenced by n1.
    let resp = app
        .clone()
        .oneshot(json_req("DELETE", "/api/platforms/p1", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // DeleteNode(n1) fails: n1's interface still carries a link.
    let resp = app
        .clone()
        .oneshot(json_req("DELETE", "/api/nodes/n1", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Directional link ids are deterministic from their endpoint interface
    // ids, so a caller that only ever saw the bidirectional wire shape can
    // still address each half for deletion.
    let fwd_id = constellation_common::ids::directional_link_id("n1/if1", "n2/if2");
    let rev_id = constellation_common::ids::directional_link_id("n2/if2", "n1/if1");

    let resp = app
        .clone()
        .oneshot(json_req("DELETE", &format!("/api/links/{fwd_id}"), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = app
        .clone()
        .oneshot(json_req("DELETE", &format!("/api/links/{rev_id}"), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // With both halves gone, n1 is no longer referenced and deletes cleanly.
    let resp = app
        .clone()
        .oneshot(json_req("DELETE", "/api/nodes/n1", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app
        .clone()
        .oneshot(json_req("GET", "/api/nodes/n1/interfaces", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tick_activates_wireless_link() {
    let (app, scenario) = test_app();

    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/platforms",
            Some(platform_wire("p1", "p1", "GROUND_STATION", "UNKNOWN", 0.0)),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/platforms",
            Some(platform_wire(
                "p2",
                "p2",
                "SATELLITE",
                "SPACETRACK",
                20_000_000.0,
            )),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/nodes",
            Some(node_wire("n1", "n1", "if1", "p1", "trx-ku")),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/nodes",
            Some(node_wire("n2", "n2", "if2", "p2", "trx-ku")),
        ))
        .await
        .unwrap();
    let resp = app
        .clone()
        .oneshot(json_req(
            "POST",
            "/api/links",
            Some(bidi_link_wire("n1", "if1", "n2", "if2")),
        ))
        .await
        .unwrap();
    let created = json_body(resp).await;
    assert_eq!(created["medium"], "WIRELESS");

    // p2 is far out of range: first tick leaves the link down.
    scenario.run_sim_tick(Utc::now(), || {}).unwrap();
    let resp = app
        .clone()
        .oneshot(json_req("GET", "/api/links", None))
        .await
        .unwrap();
    let links = json_body(resp).await;
    assert_eq!(links[0]["is_up"], false);

    // Move p2 into range, then tick again: connectivity brings the link up.
    let resp = app
        .clone()
        .oneshot(json_req(
            "PUT",
            "/api/platforms/p2",
            Some(platform_wire("p2", "p2", "SATELLITE", "SPACETRACK", 500_000.0)),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    scenario.run_sim_tick(Utc::now(), || {}).unwrap();
    let resp = app
        .clone()
        .oneshot(json_req("GET", "/api/links", None))
        .await
        .unwrap();
    let links = json_body(resp).await;
    assert_eq!(links[0]["is_up"], true);
    assert_eq!(links[0]["medium"], "WIRELESS");
}

#[tokio::test]
async fn batch_bidirectional_rollback() {
    let (app, _scenario) = test_app();

    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/platforms",
            Some(platform_wire("p1", "p1", "GROUND_STATION", "UNKNOWN", 0.0)),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/nodes",
            Some(node_wire("n1", "n1", "ifA", "p1", "trx-ku")),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/nodes",
            Some(node_wire("n2", "n2", "ifB", "p1", "trx-ku")),
        ))
        .await
        .unwrap();

    // b_tx_interface_id references a node with no such interface: the
    // second directional half fails validation and the whole batch rolls back.
    let bad = bidi_link_wire("n1", "ifA", "n2", "does-not-exist");
    let resp = app
        .clone()
        .oneshot(json_req("POST", "/api/links", Some(bad)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .clone()
        .oneshot(json_req("GET", "/api/links", None))
        .await
        .unwrap();
    let links = json_body(resp).await;
    assert_eq!(links.as_array().unwrap().len(), 0);

    let resp = app
        .clone()
        .oneshot(json_req("GET", "/api/nodes/n1/interfaces", None))
        .await
        .unwrap();
    let ifaces = json_body(resp).await;
    assert_eq!(ifaces[0]["impairments"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_link_rejects_mixed_medium_endpoints() {
    let (app, _scenario) = test_app();

    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/platforms",
            Some(platform_wire("p1", "p1", "GROUND_STATION", "UNKNOWN", 0.0)),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/nodes",
            Some(wired_node_wire("n1", "n1", "if1", "p1")),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/nodes",
            Some(node_wire("n2", "n2", "if2", "p1", "trx-ku")),
        ))
        .await
        .unwrap();

    // n1/if1 is wired, n2/if2 is wireless: a WIRED link across them must
    // be rejected regardless of what the wire payload claims.
    let resp = app
        .clone()
        .oneshot(json_req(
            "POST",
            "/api/links",
            Some(bidi_link_wire_medium("n1", "if1", "n2", "if2", "WIRED")),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app
        .clone()
        .oneshot(json_req("GET", "/api/links", None))
        .await
        .unwrap();
    let links = json_body(resp).await;
    assert_eq!(links.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn service_request_generation_and_lifecycle() {
    let (app, _scenario) = test_app();

    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/platforms",
            Some(platform_wire("p1", "p1", "GROUND_STATION", "UNKNOWN", 0.0)),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/nodes",
            Some(node_wire("n1", "n1", "if1", "p1", "trx-ku")),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/nodes",
            Some(node_wire("n2", "n2", "if2", "p1", "trx-ku")),
        ))
        .await
        .unwrap();

    let resp = app
        .clone()
        .oneshot(json_req(
            "POST",
            "/api/service-requests",
            Some(json!({
                "type": "",
                "src": {"kind": "NodeId", "value": "n1"},
                "dst": {"kind": "NodeId", "value": "n2"},
                "priority": 1,
                "allow_partner": false,
                "disruption_tolerant": false,
                "requirements": [{
                    "requested_bps": 10_000,
                    "min_bps": 5_000,
                    "max_latency_secs": 1.0,
                    "validity": null
                }],
                "federation_token": null
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = json_body(resp).await;
    let id = created["type"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(json_req("GET", &format!("/api/service-requests/{id}"), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let mut updated = created.clone();
    updated["priority"] = json!(2);
    let resp = app
        .clone()
        .oneshot(json_req(
            "PUT",
            &format!("/api/service-requests/{id}"),
            Some(updated),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated_body = json_body(resp).await;
    assert_eq!(updated_body["type"], id);
    assert_eq!(updated_body["priority"], 2);

    let resp = app
        .clone()
        .oneshot(json_req(
            "DELETE",
            &format!("/api/service-requests/{id}"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app
        .clone()
        .oneshot(json_req("GET", &format!("/api/service-requests/{id}"), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn load_scenario_replaces_prior_contents() {
    let (app, _scenario) = test_app();

    app.clone()
        .oneshot(json_req(
            "POST",
            "/api/platforms",
            Some(platform_wire("old", "old", "GROUND_STATION", "UNKNOWN", 0.0)),
        ))
        .await
        .unwrap();

    let payload = json!({
        "platforms": [platform_wire("new1", "new1", "GROUND_STATION", "UNKNOWN", 0.0)],
        "nodes": [],
        "links": [],
        "service_requests": []
    });
    let resp = app
        .clone()
        .oneshot(json_req(
            "POST",
            "/api/scenario/load",
            Some(json!({"payload": payload, "path": null})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app
        .clone()
        .oneshot(json_req("GET", "/api/platforms", None))
        .await
        .unwrap();
    let platforms = json_body(resp).await;
    assert_eq!(platforms.as_array().unwrap().len(), 1);
    assert_eq!(platforms[0]["id"], "new1");
}
