//! Tag API endpoints.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    Json,
};

use super::{error, json_body, query_params, success, ApiResult, NameQuery};
use crate::errors::AppError;
use crate::models::{CreateTagRequest, Tag, UpdateTagRequest};
use crate::AppState;

/// GET /api/tags - List tags, optionally filtered by `q`.
pub async fn list_tags(
    State(state): State<AppState>,
    params: Result<Query<NameQuery>, QueryRejection>,
) -> ApiResult<Vec<Tag>> {
    let repo = state.store.read().await;
    let revision_id = repo.revision();

    match query_params(params) {
        Ok(params) => success(
            repo.search_tags(&params.q).into_iter().cloned().collect(),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/tags - Create a new tag.
pub async fn create_tag(
    State(state): State<AppState>,
    body: Result<Json<CreateTagRequest>, JsonRejection>,
) -> ApiResult<Tag> {
    let mut repo = state.store.write().await;
    let revision_id = repo.revision();

    let result = json_body(body).and_then(|request| repo.add_tag(request));
    match result {
        Ok(tag) => success(tag, repo.revision()),
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/tags/:id - Update a tag.
pub async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTagRequest>, JsonRejection>,
) -> ApiResult<Tag> {
    let mut repo = state.store.write().await;
    let revision_id = repo.revision();

    let result = json_body(body).and_then(|request| repo.update_tag(&id, request));
    match result {
        Ok(Some(tag)) => success(tag, repo.revision()),
        Ok(None) => error(tag_not_found(&id), revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/tags/:id - Delete a tag no image uses.
pub async fn delete_tag(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let mut repo = state.store.write().await;
    let revision_id = repo.revision();

    match repo.delete_tag(&id) {
        Ok(Some(_)) => success((), repo.revision()),
        Ok(None) => error(tag_not_found(&id), revision_id),
        Err(e) => error(e, revision_id),
    }
}

fn tag_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Tag {} not found", id))
}
