// Common DTOs for public API
//
// These types are shared across multiple API endpoints.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    #[schema(example = "Access denied")]
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Convert to axum response tuple
    pub fn into_response(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

/// Error type returned by resource handlers
pub type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Log an unexpected failure and hide it behind a 500
pub fn internal_error(context: &str, err: impl std::fmt::Display) -> HandlerError {
    tracing::error!("{}: {}", context, err);
    ErrorResponse::new("Internal server error").into_response(StatusCode::INTERNAL_SERVER_ERROR)
}

pub fn not_found(message: &str) -> HandlerError {
    ErrorResponse::new(message).into_response(StatusCode::NOT_FOUND)
}

/// Response wrapper for list endpoints.
/// All list endpoints return responses wrapped in a `data` field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    /// Array of items returned by the list operation.
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Acknowledgement for create and logout operations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Id of the created resource, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "17")]
    pub message_digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MessageResponse {
    pub fn created(id: i64) -> Self {
        Self {
            message_digest: Some(id.to_string()),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            message_digest: None,
            description: Some(description.into()),
        }
    }
}
