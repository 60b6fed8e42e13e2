//! JSON error responses.
//!
//! Every failure leaves the gateway as `{code, message}` with a status that
//! matches the code. Store errors are translated in one place,
//! `store_error_to_api`, so the same store failure always looks the same on
//! the wire.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scene::store::StoreError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self { status, code, message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", "administrator token required")
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "forbidden", "token does not grant template management")
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_request", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { code: self.code, message: &self.message };
        (self.status, Json(body)).into_response()
    }
}

/// The store operation a handler was performing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Save,
    Delete,
}

pub(crate) fn store_error_to_api(err: StoreError, op: Operation) -> ApiError {
    match err {
        StoreError::NotFound(id) => ApiError::not_found(format!("template {id} not found")),
        StoreError::PermissionDenied => ApiError::forbidden(),
        StoreError::ReadFailed(message) => {
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "read_failed", message)
        }
        StoreError::WriteFailed(message) => {
            let code = if op == Operation::Delete { "delete_failed" } else { "save_failed" };
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, code, message)
        }
    }
}

/// Body rejections: schema mismatches are 422, oversized bodies 413, and
/// anything else that fails to parse is 400.
pub(crate) fn json_rejection_to_api(rejection: &JsonRejection) -> ApiError {
    let message = rejection.body_text();
    match rejection.status() {
        StatusCode::UNPROCESSABLE_ENTITY => ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "invalid_scene", message),
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", message),
        _ => ApiError::invalid_request(message),
    }
}
