//! Boundary translation from service failures to HTTP responses.
//!
//! Every failure is logged here, once, with its status, kind label,
//! operation and cause. Client errors carry a message; server errors are
//! bodiless, like the panic fallback.

use std::any::Any;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::{ErrorKind, ServiceError};
use tracing::{error, warn};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: ErrorKind,
    pub operation: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, operation: &'static str, message: impl Into<String>) -> Self {
        Self { status: status_for(kind), kind, operation, message: message.into() }
    }

    pub fn from_service(operation: &'static str, e: ServiceError) -> Self {
        Self::new(e.kind(), operation, e.to_string())
    }

    /// `map_err` adapter tagging the failure with the handler's operation name.
    pub fn op(operation: &'static str) -> impl Fn(ServiceError) -> ApiError {
        move |e| ApiError::from_service(operation, e)
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::StorageFailure | ErrorKind::Unclassified => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        let error_type = self.kind.label();
        if status.is_server_error() {
            error!(status = status.as_u16(), error_type, operation = self.operation, error_cause = %self.message, "request failed");
            status.into_response()
        } else {
            warn!(status = status.as_u16(), error_type, operation = self.operation, error_cause = %self.message, "request rejected");
            (status, Json(serde_json::json!({"error": error_type, "message": self.message}))).into_response()
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        ApiError::new(ErrorKind::Validation, "decode_body", r.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(r: PathRejection) -> Self {
        ApiError::new(ErrorKind::Validation, "decode_path", r.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(r: QueryRejection) -> Self {
        ApiError::new(ErrorKind::Validation, "decode_query", r.body_text())
    }
}

/// Last-resort fallback for panics inside the handler chain: bodiless 500.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let cause = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!(
        status = StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        error_type = "panic",
        error_cause = %cause,
        "handler panicked"
    );
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
