//! Error types for the Wonders API
//!
//! All taxonomy classification happens at this boundary: the store and seed
//! loader raise structured failures, and every variant here carries a fixed
//! HTTP status. Clients always receive a JSON `{"message": ...}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use wonders_core::StoreError;

/// API error type
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed id, missing body, or failed field validation
    #[error("{0}")]
    InvalidArgument(String),

    /// Body carries a non-zero id that disagrees with the route id
    #[error("id {body} in body does not match id {path} in path")]
    IdMismatch { path: i64, body: i64 },

    /// No record at the given id, or an empty store on random pick
    #[error("{0}")]
    NotFound(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Anything the taxonomy above does not cover
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The HTTP status this error surfaces as.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) | ApiError::IdMismatch { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidConfig(_)
            | ApiError::Io(_)
            | ApiError::Serialization(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) | StoreError::Empty => ApiError::NotFound(e.to_string()),
        }
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
