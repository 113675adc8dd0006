//! Pure query functions over the gallery collections.
//!
//! Nothing here touches the store; every function is a projection of the slices it is given,
//! so results follow the insertion order of the underlying collection.

use serde::Serialize;

use crate::models::{Category, FilterState, Image, Tag};

/// One page of a derived list.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Case-insensitive substring test. An empty needle matches everything.
fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}

/// Whether the image's name or description contains the search text.
pub fn matches_search(image: &Image, query: &str) -> bool {
    let needle = query.to_lowercase();
    contains_ci(&image.name, &needle) || contains_ci(&image.description, &needle)
}

/// Whether the image satisfies every active filter.
///
/// Search, category and tags combine with AND; selected tags must all be present.
pub fn matches_filters(image: &Image, filters: &FilterState) -> bool {
    let matches_category = filters
        .selected_category
        .as_deref()
        .map_or(true, |category_id| image.has_category(category_id));

    matches_category
        && filters.selected_tags.iter().all(|tag_id| image.has_tag(tag_id))
        && matches_search(image, &filters.search_query)
}

/// The derived gallery view for the given filter state.
pub fn filter_images<'a>(images: &'a [Image], filters: &FilterState) -> Vec<&'a Image> {
    if filters.is_empty() {
        return images.iter().collect();
    }
    images
        .iter()
        .filter(|image| matches_filters(image, filters))
        .collect()
}

/// Categories whose name or description contains the query, ignoring case.
pub fn search_categories<'a>(categories: &'a [Category], query: &str) -> Vec<&'a Category> {
    let needle = query.to_lowercase();
    categories
        .iter()
        .filter(|category| {
            contains_ci(&category.name, &needle)
                || category
                    .description
                    .as_deref()
                    .is_some_and(|d| contains_ci(d, &needle))
        })
        .collect()
}

/// Tags whose name contains the query, ignoring case.
pub fn search_tags<'a>(tags: &'a [Tag], query: &str) -> Vec<&'a Tag> {
    let needle = query.to_lowercase();
    tags.iter()
        .filter(|tag| contains_ci(&tag.name, &needle))
        .collect()
}

/// Slice `items` into 1-based pages of `per_page`.
///
/// Page 0 is served as page 1 and a zero page size as 1. A page past the end is empty.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let items = items
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}
