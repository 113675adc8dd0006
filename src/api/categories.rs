//! Category API endpoints.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    Json,
};

use super::{error, json_body, query_params, success, ApiResult, NameQuery};
use crate::errors::AppError;
use crate::models::{Category, CategoryCount, CreateCategoryRequest, UpdateCategoryRequest};
use crate::AppState;

/// GET /api/categories - List categories, optionally filtered by `q`.
pub async fn list_categories(
    State(state): State<AppState>,
    params: Result<Query<NameQuery>, QueryRejection>,
) -> ApiResult<Vec<Category>> {
    let repo = state.store.read().await;
    let revision_id = repo.revision();

    match query_params(params) {
        Ok(params) => success(
            repo.search_categories(&params.q).into_iter().cloned().collect(),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/categories/counts - Image totals per category.
pub async fn category_counts(State(state): State<AppState>) -> ApiResult<Vec<CategoryCount>> {
    let repo = state.store.read().await;
    success(repo.category_counts(), repo.revision())
}

/// POST /api/categories - Create a new category.
pub async fn create_category(
    State(state): State<AppState>,
    body: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> ApiResult<Category> {
    let mut repo = state.store.write().await;
    let revision_id = repo.revision();

    let result = json_body(body).and_then(|request| repo.add_category(request));
    match result {
        Ok(category) => success(category, repo.revision()),
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/categories/:id - Update a category.
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateCategoryRequest>, JsonRejection>,
) -> ApiResult<Category> {
    let mut repo = state.store.write().await;
    let revision_id = repo.revision();

    let result = json_body(body).and_then(|request| repo.update_category(&id, request));
    match result {
        Ok(Some(category)) => success(category, repo.revision()),
        Ok(None) => error(category_not_found(&id), revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/categories/:id - Delete a category no image uses.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let mut repo = state.store.write().await;
    let revision_id = repo.revision();

    match repo.delete_category(&id) {
        Ok(Some(_)) => success((), repo.revision()),
        Ok(None) => error(category_not_found(&id), revision_id),
        Err(e) => error(e, revision_id),
    }
}

fn category_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Category {} not found", id))
}
