//! Constellation scenario core — NBI service
//!
//! Single binary that runs:
//! - REST API over the scenario state manager
//! - A background simulation tick that advances motion and connectivity

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use constellation_core::{NoopMetrics, ScenarioState, TracingMetrics};
use constellation_nbi::{api, request_id, state, tick};
use constellation_sim::{LinearMotionModel, RangeConnectivity};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging ─────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── Configuration ───────────────────────────────────────────
    let tick_interval_ms: u64 = std::env::var("TICK_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1000);
    let motion_seed: u64 = std::env::var("MOTION_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let connectivity_range_km: f64 = std::env::var("CONNECTIVITY_RANGE_KM")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3_000.0);
    let metrics_enabled = std::env::var("METRICS_ENABLED")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    // ── Scenario state ──────────────────────────────────────────
    // `Arc::new_cyclic` breaks the circularity between `ScenarioState` and
    // its collaborators: each collaborator holds a `Weak` handle back into
    // the state it serves, upgraded only while it actually runs.
    let scenario = Arc::new_cyclic(|weak: &std::sync::Weak<ScenarioState>| {
        let motion = Arc::new(LinearMotionModel::new(weak.clone(), motion_seed));
        let connectivity = Arc::new(RangeConnectivity::new(weak.clone(), connectivity_range_km));
        let built = ScenarioState::new(motion, connectivity);
        if metrics_enabled {
            built.with_metrics(Arc::new(TracingMetrics))
        } else {
            built.with_metrics(Arc::new(NoopMetrics))
        }
    });

    // ── Background tick ─────────────────────────────────────────
    let _tick_handle = tick::spawn(scenario.clone(), tick_interval_ms);

    // ── Router ──────────────────────────────────────────────────
    let app_state = state::AppState::new(scenario);
    let app = Router::new()
        .nest("/api", api::router())
        .layer(axum::middleware::from_fn(request_id::propagate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // ── Listen ──────────────────────────────────────────────────
    let addr: SocketAddr = std::env::var("LISTEN_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".into())
        .parse()?;

    tracing::info!("constellation-nbi listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
