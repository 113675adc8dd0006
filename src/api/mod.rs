//! REST API module.
//!
//! Thin handlers over the shared store. Each handler takes the store lock once, so every
//! request sees and produces a consistent revision.

mod categories;
mod filters;
mod gallery;
mod images;
mod tags;

pub use categories::*;
pub use filters::*;
pub use gallery::*;
pub use images::*;
pub use tags::*;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppErrorWithRevision};

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub revision_id: u64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, revision_id: u64) -> Self {
        Self {
            success: true,
            data,
            revision_id,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppErrorWithRevision>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, revision_id: u64) -> ApiResult<T> {
    Ok(ApiResponse::new(data, revision_id))
}

/// Create an error API response.
pub fn error<T: Serialize>(err: AppError, revision_id: u64) -> ApiResult<T> {
    Err(AppErrorWithRevision {
        error: err,
        revision_id,
    })
}

/// Unwrap a JSON body, turning extractor rejections into the error envelope.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Unwrap query parameters, turning extractor rejections into the error envelope.
pub(crate) fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    params
        .map(|Query(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Optional name filter used by the category and tag listings.
#[derive(Debug, Default, Deserialize)]
pub struct NameQuery {
    #[serde(default)]
    pub q: String,
}
