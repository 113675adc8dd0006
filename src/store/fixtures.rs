//! Bundled sample gallery.

use crate::errors::AppError;
use crate::models::GallerySeed;

const GALLERY_JSON: &str = include_str!("../../fixtures/gallery.json");

/// Parse the bundled sample gallery.
pub fn sample_gallery() -> Result<GallerySeed, AppError> {
    serde_json::from_str(GALLERY_JSON)
        .map_err(|e| AppError::Internal(format!("Invalid bundled gallery fixture: {}", e)))
}
