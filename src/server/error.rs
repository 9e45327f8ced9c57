//! HTTP error responses.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::error::ServiceError;

/// JSON body shared by status and error responses: `{"status": ..., "message": ...}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusBody {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusBody {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: None,
        }
    }

    pub fn with_message(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: Some(message.into()),
        }
    }
}

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Contact not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// Email or phone already belongs to another contact
    #[error("Contact already exists.")]
    Conflict,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn status_label(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "invalid",
            Self::Conflict => "duplicate",
            Self::Internal(_) => "error",
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(id) => Self::NotFound(id),
            ServiceError::InvalidRequest(message) => Self::BadRequest(message),
            ServiceError::Duplicate { .. } => Self::Conflict,
            ServiceError::Store(e) => {
                tracing::error!(error = %e, "Contact store failure");
                Self::Internal(e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = StatusBody::with_message(self.status_label(), self.to_string());
        (self.status_code(), Json(body)).into_response()
    }
}
