use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::{ErrorKind, ErrorResponse};
use tracing::{error, warn};

use crate::domain::DomainError;

/// Failure of a REST handler, rendered as an [`ErrorResponse`] body
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    /// The request body was not the JSON the route expects
    MalformedBody(String),
    /// A path segment was not a record id
    MalformedPath(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::MalformedPath(rejection.body_text())
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Transport => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl ApiError {
    fn to_body(&self) -> ErrorResponse {
        match self {
            ApiError::MalformedBody(detail) => ErrorResponse {
                kind: ErrorKind::Validation,
                message: "request body is not valid JSON for this operation".to_string(),
                details: vec![detail.clone()],
            },
            ApiError::MalformedPath(detail) => ErrorResponse {
                kind: ErrorKind::Validation,
                message: "record id must be a whole number".to_string(),
                details: vec![detail.clone()],
            },
            ApiError::Domain(DomainError::Validation(issues)) => ErrorResponse {
                kind: ErrorKind::Validation,
                message: "validation failed".to_string(),
                details: issues.iter().map(ToString::to_string).collect(),
            },
            // store internals stay in the log
            ApiError::Domain(DomainError::Transport(_)) => ErrorResponse {
                kind: ErrorKind::Transport,
                message: "the record store is unavailable, try again later".to_string(),
                details: Vec::new(),
            },
            ApiError::Domain(err) => ErrorResponse {
                kind: err.kind(),
                message: err.to_string(),
                details: Vec::new(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Domain(err) if err.is_retryable() => {
                error!("Record store failure, client may retry: {:?}", err);
            }
            ApiError::Domain(err) => warn!("Request failed: {}", err),
            ApiError::MalformedBody(detail) => warn!("Malformed request body: {}", detail),
            ApiError::MalformedPath(detail) => warn!("Malformed request path: {}", detail),
        }

        let body = self.to_body();
        (status_for(body.kind), Json(body)).into_response()
    }
}
