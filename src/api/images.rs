//! Image API endpoints.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{error, json_body, query_params, success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateImageRequest, DownloadLink, Image, ImageDetail, UpdateImageRequest};
use crate::store::query::Page;
use crate::AppState;

/// Maximum number of images served per page.
const MAX_PAGE_SIZE: usize = 100;

/// Pagination parameters for the gallery listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// 1-based page number (default: 1).
    #[serde(default)]
    pub page: Option<usize>,
    /// Page size (default: configured page size).
    #[serde(default)]
    pub per_page: Option<usize>,
}

/// GET /api/images - One page of images matching the current filters.
pub async fn list_images(
    State(state): State<AppState>,
    params: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Page<Image>> {
    let repo = state.store.read().await;
    let revision_id = repo.revision();

    let params = match query_params(params) {
        Ok(params) => params,
        Err(e) => return error(e, revision_id),
    };

    let page = params.page.unwrap_or(1);
    let per_page = params
        .per_page
        .unwrap_or(state.config.page_size)
        .min(MAX_PAGE_SIZE);

    success(repo.filtered_page(page, per_page), revision_id)
}

/// GET /api/images/:id - Get an image with its categories and tags.
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ImageDetail> {
    let repo = state.store.read().await;
    let revision_id = repo.revision();

    match repo.image_detail(&id) {
        Some(detail) => success(detail, revision_id),
        None => error(image_not_found(&id), revision_id),
    }
}

/// GET /api/images/:id/download - Where and under which name to download an image.
pub async fn download_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DownloadLink> {
    let repo = state.store.read().await;
    let revision_id = repo.revision();

    match repo.download_link(&id) {
        Some(link) => success(link, revision_id),
        None => error(image_not_found(&id), revision_id),
    }
}

/// POST /api/images - Register a new image by URL.
pub async fn create_image(
    State(state): State<AppState>,
    body: Result<Json<CreateImageRequest>, JsonRejection>,
) -> ApiResult<Image> {
    let mut repo = state.store.write().await;
    let revision_id = repo.revision();

    let request = match json_body(body) {
        Ok(request) => request,
        Err(e) => return error(e, revision_id),
    };

    // Validate required fields
    if request.name.trim().is_empty() {
        return error(
            AppError::Validation("Image name is required".to_string()),
            revision_id,
        );
    }
    if request.url.trim().is_empty() {
        return error(
            AppError::Validation("Image URL is required".to_string()),
            revision_id,
        );
    }

    let image = repo.add_image(request);
    success(image, repo.revision())
}

/// PUT /api/images/:id - Update an image.
pub async fn update_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateImageRequest>, JsonRejection>,
) -> ApiResult<Image> {
    let mut repo = state.store.write().await;
    let revision_id = repo.revision();

    let request = match json_body(body) {
        Ok(request) => request,
        Err(e) => return error(e, revision_id),
    };

    if request.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return error(
            AppError::Validation("Image name cannot be blank".to_string()),
            revision_id,
        );
    }
    if request.url.as_deref().is_some_and(|u| u.trim().is_empty()) {
        return error(
            AppError::Validation("Image URL cannot be blank".to_string()),
            revision_id,
        );
    }

    match repo.update_image(&id, request) {
        Some(image) => success(image, repo.revision()),
        None => error(image_not_found(&id), revision_id),
    }
}

/// DELETE /api/images/:id - Delete an image.
pub async fn delete_image(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let mut repo = state.store.write().await;
    let revision_id = repo.revision();

    match repo.delete_image(&id) {
        Some(_) => success((), repo.revision()),
        None => error(image_not_found(&id), revision_id),
    }
}

fn image_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Image {} not found", id))
}
