//! Gallery-wide snapshot and filter state models.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Category, Image, Tag};

/// The full contents of the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gallery {
    pub revision_id: u64,
    pub images: Vec<Image>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub filters: FilterState,
}

/// Seed data loaded at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GallerySeed {
    pub images: Vec<Image>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}

/// Revision information for change detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionInfo {
    pub revision_id: u64,
}

/// Current browse selection: search text, category and tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub search_query: String,
    pub selected_category: Option<String>,
    pub selected_tags: BTreeSet<String>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.search_query.is_empty()
            && self.selected_category.is_none()
            && self.selected_tags.is_empty()
    }
}

/// Request body for replacing the search text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSearchQueryRequest {
    #[serde(default)]
    pub query: String,
}

/// Request body for selecting a category; `null` selects all.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSelectedCategoryRequest {
    #[serde(default)]
    pub category_id: Option<String>,
}
