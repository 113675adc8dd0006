//! Filter selection endpoints.
//!
//! The selection lives in the store, so every client of this server browses the same view.

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    Json,
};

use super::{error, json_body, success, ApiResult};
use crate::models::{FilterState, SetSearchQueryRequest, SetSelectedCategoryRequest};
use crate::AppState;

/// GET /api/filters - Current search text, category and tag selection.
pub async fn get_filters(State(state): State<AppState>) -> ApiResult<FilterState> {
    let repo = state.store.read().await;
    success(repo.filter_state().clone(), repo.revision())
}

/// PUT /api/filters/search - Replace the search text.
pub async fn set_search_query(
    State(state): State<AppState>,
    body: Result<Json<SetSearchQueryRequest>, JsonRejection>,
) -> ApiResult<FilterState> {
    let mut repo = state.store.write().await;

    match json_body(body) {
        Ok(request) => {
            repo.set_search_query(request.query);
            success(repo.filter_state().clone(), repo.revision())
        }
        Err(e) => error(e, repo.revision()),
    }
}

/// PUT /api/filters/category - Select a category, or all with `null`.
pub async fn set_selected_category(
    State(state): State<AppState>,
    body: Result<Json<SetSelectedCategoryRequest>, JsonRejection>,
) -> ApiResult<FilterState> {
    let mut repo = state.store.write().await;

    match json_body(body) {
        Ok(request) => {
            repo.set_selected_category(request.category_id);
            success(repo.filter_state().clone(), repo.revision())
        }
        Err(e) => error(e, repo.revision()),
    }
}

/// POST /api/filters/tags/:id/toggle - Add or remove a tag from the selection.
pub async fn toggle_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<FilterState> {
    let mut repo = state.store.write().await;
    repo.toggle_tag(&id);
    success(repo.filter_state().clone(), repo.revision())
}

/// DELETE /api/filters/tags - Deselect every tag.
pub async fn clear_selected_tags(State(state): State<AppState>) -> ApiResult<FilterState> {
    let mut repo = state.store.write().await;
    repo.clear_selected_tags();
    success(repo.filter_state().clone(), repo.revision())
}
