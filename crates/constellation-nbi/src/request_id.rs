//! `x-request-id` propagation (spec §6): trust an inbound header, else
//! generate a fresh UUIDv7 — the same "trust inbound, else generate" rule
//! the teacher applies to WebSocket envelope ids (`Envelope::new`).

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

pub const HEADER_NAME: &str = "x-request-id";

#[derive(Debug, Clone)]
pub struct RequestId(pub String);

pub async fn propagate(mut req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(HEADER_NAME)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    req.extensions_mut().insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let mut response = next.run(req).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(HEADER_NAME, value);
    }
    response
}
