//! Error handling module for the gallery backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const DUPLICATE_NAME: &str = "DUPLICATE_NAME";
    pub const IN_USE: &str = "IN_USE";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Application error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Validation error
    Validation(String),
    /// A category or tag with the same name (ignoring case) already exists
    DuplicateName { entity: &'static str, name: String },
    /// Delete rejected because images still reference the record
    InUse { message: String, image_count: usize },
    /// Bad request
    BadRequest(String),
    /// Invalid configuration
    Config(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateName { .. } => StatusCode::CONFLICT,
            AppError::InUse { .. } => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::DuplicateName { .. } => codes::DUPLICATE_NAME,
            AppError::InUse { .. } => codes::IN_USE,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
            AppError::Config(_) => codes::CONFIG_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::DuplicateName { entity, name } => {
                format!("A {} named '{}' already exists", entity, name)
            }
            AppError::InUse { message, .. } => message.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Config(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
    pub revision_id: u64,
}

impl ErrorResponse {
    pub fn new(error: &AppError, revision_id: u64) -> Self {
        let details = match error {
            AppError::InUse { image_count, .. } => {
                Some(serde_json::json!({ "imageCount": image_count }))
            }
            AppError::DuplicateName { name, .. } => Some(serde_json::json!({ "name": name })),
            _ => None,
        };

        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                details,
            },
            revision_id,
        }
    }
}

/// Wrapper type for errors that carry revision_id context.
pub struct AppErrorWithRevision {
    pub error: AppError,
    pub revision_id: u64,
}

impl IntoResponse for AppErrorWithRevision {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let body = ErrorResponse::new(&self.error, self.revision_id);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_use_maps_to_conflict_with_count() {
        let err = AppError::InUse {
            message: "Category c1 is used by 3 images".to_string(),
            image_count: 3,
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let body = ErrorResponse::new(&err, 7);
        assert_eq!(body.error.code, codes::IN_USE);
        assert_eq!(body.revision_id, 7);
        assert_eq!(body.error.details.unwrap()["imageCount"], 3);
    }

    #[test]
    fn test_duplicate_name_message() {
        let err = AppError::DuplicateName {
            entity: "category",
            name: "logos".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            err.to_string(),
            "DUPLICATE_NAME: A category named 'logos' already exists"
        );
    }
}
