//! Gallery snapshot endpoints.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::{Gallery, RevisionInfo};
use crate::AppState;

/// GET /api/gallery - Get the full gallery.
pub async fn get_gallery(State(state): State<AppState>) -> ApiResult<Gallery> {
    let repo = state.store.read().await;
    let gallery = repo.snapshot();
    let revision_id = gallery.revision_id;
    success(gallery, revision_id)
}

/// GET /api/gallery/revision - Get the current revision info.
pub async fn get_revision(State(state): State<AppState>) -> ApiResult<RevisionInfo> {
    let repo = state.store.read().await;
    success(repo.revision_info(), repo.revision())
}
