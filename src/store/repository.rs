//! Repository store for gallery CRUD operations and browse state.
//!
//! Writers take `&mut self` and run to completion, so a shared store only needs a single lock
//! around each call. Category and tag names are checked for uniqueness here, and deletes of
//! records still referenced by an image are refused rather than cascaded.

use chrono::Utc;
use uuid::Uuid;

use super::query::{self, Page};
use crate::errors::AppError;
use crate::models::{
    dedup_ids, Category, CategoryCount, CreateCategoryRequest, CreateImageRequest,
    CreateTagRequest, DownloadLink, FilterState, Gallery, GallerySeed, Image, ImageDetail,
    ImageType, RevisionInfo, Tag, UpdateCategoryRequest, UpdateImageRequest, UpdateTagRequest,
};

/// In-memory owner of the gallery collections and the current filter selection.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    images: Vec<Image>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
    filters: FilterState,
    revision: u64,
}

impl Repository {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the given records. Seeding does not count as a revision.
    pub fn from_seed(seed: GallerySeed) -> Self {
        Self {
            images: seed.images,
            categories: seed.categories,
            tags: seed.tags,
            filters: FilterState::default(),
            revision: 0,
        }
    }

    /// Current revision; bumped once per successful change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn revision_info(&self) -> RevisionInfo {
        RevisionInfo {
            revision_id: self.revision,
        }
    }

    fn bump_revision(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    /// Get the full gallery.
    pub fn snapshot(&self) -> Gallery {
        Gallery {
            revision_id: self.revision,
            images: self.images.clone(),
            categories: self.categories.clone(),
            tags: self.tags.clone(),
            filters: self.filters.clone(),
        }
    }

    // ==================== IMAGE OPERATIONS ====================

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn get_image(&self, id: &str) -> Option<&Image> {
        self.images.iter().find(|image| image.id == id)
    }

    /// Register a new image. Category and tag ids are stored as given, known or not.
    pub fn add_image(&mut self, request: CreateImageRequest) -> Image {
        let id = fresh_id(|candidate| self.get_image(candidate).is_some());
        let kind = request
            .kind
            .or_else(|| ImageType::from_url(&request.url))
            .unwrap_or_default();

        let image = Image {
            id,
            name: request.name,
            description: request.description,
            kind,
            url: request.url,
            category_ids: dedup_ids(request.category_ids),
            tag_ids: dedup_ids(request.tag_ids),
            thumbnail_url: request.thumbnail_url,
            created_at: Utc::now(),
        };

        self.images.push(image.clone());
        self.bump_revision();
        tracing::info!(image_id = %image.id, kind = image.kind.as_str(), "Added image");

        image
    }

    /// Merge the given fields into an image. Returns `None` when the id is unknown.
    ///
    /// A patch that leaves every field as it was does not count as a revision.
    pub fn update_image(&mut self, id: &str, request: UpdateImageRequest) -> Option<Image> {
        let image = self.images.iter_mut().find(|image| image.id == id)?;
        let mut changed = false;

        if let Some(name) = request.name {
            changed |= assign(&mut image.name, name);
        }
        if let Some(description) = request.description {
            changed |= assign(&mut image.description, description);
        }
        if let Some(kind) = request.kind {
            changed |= assign(&mut image.kind, kind);
        }
        if let Some(url) = request.url {
            changed |= assign(&mut image.url, url);
        }
        if let Some(category_ids) = request.category_ids {
            changed |= assign(&mut image.category_ids, dedup_ids(category_ids));
        }
        if let Some(tag_ids) = request.tag_ids {
            changed |= assign(&mut image.tag_ids, dedup_ids(tag_ids));
        }
        if let Some(thumbnail_url) = request.thumbnail_url {
            changed |= assign(&mut image.thumbnail_url, thumbnail_url);
        }

        let updated = image.clone();
        if changed {
            self.bump_revision();
            tracing::info!(image_id = id, "Updated image");
        }
        Some(updated)
    }

    /// Remove an image. Images are never referenced by other records, so this cannot conflict.
    pub fn delete_image(&mut self, id: &str) -> Option<Image> {
        let index = self.images.iter().position(|image| image.id == id)?;
        let removed = self.images.remove(index);
        self.bump_revision();
        tracing::info!(image_id = id, "Deleted image");
        Some(removed)
    }

    /// An image with its categories and tags resolved. Dangling ids are skipped.
    pub fn image_detail(&self, id: &str) -> Option<ImageDetail> {
        let image = self.get_image(id)?;
        let categories = self
            .categories
            .iter()
            .filter(|category| image.has_category(&category.id))
            .cloned()
            .collect();
        let tags = self
            .tags
            .iter()
            .filter(|tag| image.has_tag(&tag.id))
            .cloned()
            .collect();

        Some(ImageDetail {
            image: image.clone(),
            categories,
            tags,
        })
    }

    pub fn download_link(&self, id: &str) -> Option<DownloadLink> {
        self.get_image(id).map(|image| DownloadLink {
            file_name: image.download_file_name(),
            url: image.url.clone(),
        })
    }

    /// Images passing the current filter selection, in insertion order.
    pub fn filtered_images(&self) -> Vec<&Image> {
        query::filter_images(&self.images, &self.filters)
    }

    /// One page of the filtered images.
    pub fn filtered_page(&self, page: usize, per_page: usize) -> Page<Image> {
        let items = self.filtered_images().into_iter().cloned().collect();
        query::paginate(items, page, per_page)
    }

    // ==================== CATEGORY OPERATIONS ====================

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get_category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn search_categories(&self, query: &str) -> Vec<&Category> {
        query::search_categories(&self.categories, query)
    }

    /// Image totals for "all" followed by each category in collection order.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut counts = Vec::with_capacity(self.categories.len() + 1);
        counts.push(CategoryCount {
            category_id: None,
            name: None,
            image_count: self.images.len(),
        });
        counts.extend(self.categories.iter().map(|category| CategoryCount {
            category_id: Some(category.id.clone()),
            name: Some(category.name.clone()),
            image_count: self.images_in_category(&category.id),
        }));
        counts
    }

    fn images_in_category(&self, category_id: &str) -> usize {
        self.images
            .iter()
            .filter(|image| image.has_category(category_id))
            .count()
    }

    /// Create a category. The name must be non-blank and unique ignoring case.
    pub fn add_category(&mut self, request: CreateCategoryRequest) -> Result<Category, AppError> {
        let name = validate_name(
            "category",
            &request.name,
            self.categories.iter().map(|c| c.name.as_str()),
        )?;
        let id = fresh_id(|candidate| self.get_category(candidate).is_some());

        let category = Category {
            id,
            name,
            description: non_blank(request.description),
        };

        self.categories.push(category.clone());
        self.bump_revision();
        tracing::info!(category_id = %category.id, name = %category.name, "Added category");

        Ok(category)
    }

    /// Merge the given fields into a category.
    ///
    /// Returns `Ok(None)` without touching anything when the id is unknown.
    pub fn update_category(
        &mut self,
        id: &str,
        request: UpdateCategoryRequest,
    ) -> Result<Option<Category>, AppError> {
        let Some(index) = self.categories.iter().position(|c| c.id == id) else {
            return Ok(None);
        };

        let name = match &request.name {
            Some(name) => Some(validate_name(
                "category",
                name,
                self.categories
                    .iter()
                    .filter(|c| c.id != id)
                    .map(|c| c.name.as_str()),
            )?),
            None => None,
        };

        let category = &mut self.categories[index];
        let mut changed = false;
        if let Some(name) = name {
            changed |= assign(&mut category.name, name);
        }
        if let Some(description) = request.description {
            changed |= assign(&mut category.description, non_blank(description));
        }

        let updated = category.clone();
        if changed {
            self.bump_revision();
            tracing::info!(category_id = id, "Updated category");
        }
        Ok(Some(updated))
    }

    /// Delete a category that no image references.
    ///
    /// Any image naming the id blocks the delete with `AppError::InUse`, even when the id is
    /// not a known category. On success the category filter is cleared if it pointed at the
    /// removed record.
    pub fn delete_category(&mut self, id: &str) -> Result<Option<Category>, AppError> {
        let image_count = self.images_in_category(id);
        if image_count > 0 {
            tracing::warn!(category_id = id, image_count, "Refused to delete category in use");
            return Err(AppError::InUse {
                message: format!("Category {} is used by {} image(s)", id, image_count),
                image_count,
            });
        }

        let Some(index) = self.categories.iter().position(|c| c.id == id) else {
            return Ok(None);
        };

        let removed = self.categories.remove(index);
        if self.filters.selected_category.as_deref() == Some(id) {
            self.filters.selected_category = None;
        }
        self.bump_revision();
        tracing::info!(category_id = id, "Deleted category");

        Ok(Some(removed))
    }

    // ==================== TAG OPERATIONS ====================

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn get_tag(&self, id: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == id)
    }

    pub fn search_tags(&self, query: &str) -> Vec<&Tag> {
        query::search_tags(&self.tags, query)
    }

    /// Create a tag. The name must be non-blank and unique ignoring case.
    pub fn add_tag(&mut self, request: CreateTagRequest) -> Result<Tag, AppError> {
        let name = validate_name("tag", &request.name, self.tags.iter().map(|t| t.name.as_str()))?;
        let id = fresh_id(|candidate| self.get_tag(candidate).is_some());

        let tag = Tag { id, name };

        self.tags.push(tag.clone());
        self.bump_revision();
        tracing::info!(tag_id = %tag.id, name = %tag.name, "Added tag");

        Ok(tag)
    }

    /// Merge the given fields into a tag. Returns `Ok(None)` when the id is unknown.
    pub fn update_tag(
        &mut self,
        id: &str,
        request: UpdateTagRequest,
    ) -> Result<Option<Tag>, AppError> {
        let Some(index) = self.tags.iter().position(|t| t.id == id) else {
            return Ok(None);
        };

        let mut changed = false;
        if let Some(name) = &request.name {
            let name = validate_name(
                "tag",
                name,
                self.tags.iter().filter(|t| t.id != id).map(|t| t.name.as_str()),
            )?;
            changed |= assign(&mut self.tags[index].name, name);
        }

        let updated = self.tags[index].clone();
        if changed {
            self.bump_revision();
            tracing::info!(tag_id = id, "Updated tag");
        }
        Ok(Some(updated))
    }

    /// Delete a tag that no image references, dropping it from the tag filter.
    pub fn delete_tag(&mut self, id: &str) -> Result<Option<Tag>, AppError> {
        let image_count = self.images.iter().filter(|image| image.has_tag(id)).count();
        if image_count > 0 {
            tracing::warn!(tag_id = id, image_count, "Refused to delete tag in use");
            return Err(AppError::InUse {
                message: format!("Tag {} is used by {} image(s)", id, image_count),
                image_count,
            });
        }

        let Some(index) = self.tags.iter().position(|t| t.id == id) else {
            return Ok(None);
        };

        let removed = self.tags.remove(index);
        self.filters.selected_tags.remove(id);
        self.bump_revision();
        tracing::info!(tag_id = id, "Deleted tag");

        Ok(Some(removed))
    }

    // ==================== FILTER STATE ====================

    pub fn filter_state(&self) -> &FilterState {
        &self.filters
    }

    /// Replace the search text verbatim.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if self.filters.search_query != query {
            tracing::debug!(query = %query, "Search query changed");
            self.filters.search_query = query;
            self.bump_revision();
        }
    }

    /// Select a category, or all of them with `None`. The id is not checked.
    pub fn set_selected_category(&mut self, category_id: Option<String>) {
        if self.filters.selected_category != category_id {
            tracing::debug!(category_id = ?category_id, "Selected category changed");
            self.filters.selected_category = category_id;
            self.bump_revision();
        }
    }

    /// Flip a tag in the selection. Returns whether the tag is selected afterwards.
    pub fn toggle_tag(&mut self, tag_id: &str) -> bool {
        let selected = if self.filters.selected_tags.remove(tag_id) {
            false
        } else {
            self.filters.selected_tags.insert(tag_id.to_string());
            true
        };
        tracing::debug!(tag_id, selected, "Toggled tag filter");
        self.bump_revision();
        selected
    }

    pub fn clear_selected_tags(&mut self) {
        if !self.filters.selected_tags.is_empty() {
            self.filters.selected_tags.clear();
            self.bump_revision();
        }
    }
}

/// A new random id for which `taken` is false.
fn fresh_id<F>(taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let id = Uuid::new_v4().to_string();
        if !taken(&id) {
            return id;
        }
    }
}

/// Trim `name` and check it against `existing` names, ignoring case.
fn validate_name<'a, I>(entity: &'static str, name: &str, existing: I) -> Result<String, AppError>
where
    I: IntoIterator<Item = &'a str>,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(format!("A {} name is required", entity)));
    }

    let lowered = name.to_lowercase();
    if existing
        .into_iter()
        .any(|other| other.trim().to_lowercase() == lowered)
    {
        tracing::warn!(entity, name, "Rejected duplicate name");
        return Err(AppError::DuplicateName {
            entity,
            name: name.to_string(),
        });
    }

    Ok(name.to_string())
}

/// Store `value` in `slot`, reporting whether it differed.
fn assign<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
