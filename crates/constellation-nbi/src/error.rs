//! Translates a [`CoreError`] (or an unexpected internal failure) into an
//! HTTP response, grounded on `strata-control::api::auth::ApiError`.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use constellation_core::{CoreError, StatusClass};

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "invalid_argument",
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal",
            message: msg.into(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let (status, code) = match err.status_class() {
            StatusClass::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            StatusClass::InvalidArgument => (StatusCode::BAD_REQUEST, "invalid_argument"),
            StatusClass::FailedPrecondition => (StatusCode::CONFLICT, "failed_precondition"),
            StatusClass::AlreadyExists => (StatusCode::CONFLICT, "already_exists"),
            StatusClass::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        Self {
            status,
            code,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({
            "error": self.code,
            "message": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}
