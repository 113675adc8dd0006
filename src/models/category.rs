//! Category model.

use serde::{Deserialize, Serialize};

use super::double_option;

/// A named grouping of images. An image may belong to several categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for creating a new category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for updating an existing category.
///
/// `description` distinguishes an absent field (keep) from an explicit `null` (clear).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

/// Number of images filed under a category, or under all of them when `category_id` is `None`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub image_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_description_absent_vs_null() {
        let absent: UpdateCategoryRequest = serde_json::from_str(r#"{"name":"Logos"}"#).unwrap();
        assert_eq!(absent.description, None);

        let cleared: UpdateCategoryRequest =
            serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));

        let set: UpdateCategoryRequest =
            serde_json::from_str(r#"{"description":"Vector marks"}"#).unwrap();
        assert_eq!(set.description, Some(Some("Vector marks".to_string())));
    }

    #[test]
    fn test_category_omits_missing_description() {
        let category = Category {
            id: "c9".to_string(),
            name: "Misc".to_string(),
            description: None,
        };
        let json = serde_json::to_value(&category).unwrap();
        assert!(json.get("description").is_none());
    }
}
