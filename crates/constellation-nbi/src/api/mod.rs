//! REST API route tree (spec §6).

pub mod links;
pub mod nodes;
pub mod platforms;
pub mod scenario;
pub mod service_requests;
pub mod telemetry;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/platforms", platforms::router())
        .nest("/nodes", nodes::router())
        .nest("/links", links::router())
        .nest("/service-requests", service_requests::router())
        .nest("/scenario", scenario::router())
        .nest("/telemetry", telemetry::router())
}
