//! Image model. PDFs share this record; `kind` tells them apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{double_option, Category, Tag};

/// File kinds the gallery can reference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Svg,
    #[default]
    Png,
    Jpg,
    Jpeg,
    Gif,
    Webp,
    Pdf,
}

impl ImageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::Svg => "svg",
            ImageType::Png => "png",
            ImageType::Jpg => "jpg",
            ImageType::Jpeg => "jpeg",
            ImageType::Gif => "gif",
            ImageType::Webp => "webp",
            ImageType::Pdf => "pdf",
        }
    }

    /// Parse a file extension, ignoring case and a leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "svg" => Some(ImageType::Svg),
            "png" => Some(ImageType::Png),
            "jpg" => Some(ImageType::Jpg),
            "jpeg" => Some(ImageType::Jpeg),
            "gif" => Some(ImageType::Gif),
            "webp" => Some(ImageType::Webp),
            "pdf" => Some(ImageType::Pdf),
            _ => None,
        }
    }

    /// Guess the kind from the last path segment of a URL.
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let file = path.rsplit('/').next().unwrap_or_default();
        let (_, ext) = file.rsplit_once('.')?;
        Self::from_extension(ext)
    }
}

/// A referenced image or document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ImageType,
    pub url: String,
    #[serde(default)]
    pub category_ids: Vec<String>,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Image {
    pub fn has_category(&self, category_id: &str) -> bool {
        self.category_ids.iter().any(|id| id == category_id)
    }

    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tag_ids.iter().any(|id| id == tag_id)
    }

    /// File name offered to the browser when downloading.
    pub fn download_file_name(&self) -> String {
        format!("{}.{}", self.name, self.kind.as_str())
    }
}

/// Request body for registering a new image by URL.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Inferred from the URL extension when omitted, falling back to PNG.
    #[serde(rename = "type", default)]
    pub kind: Option<ImageType>,
    pub url: String,
    #[serde(default)]
    pub category_ids: Vec<String>,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// Request body for updating an existing image. `id` and `createdAt` are fixed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImageRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<ImageType>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub category_ids: Option<Vec<String>>,
    #[serde(default)]
    pub tag_ids: Option<Vec<String>>,
    /// Absent keeps the thumbnail, `null` removes it.
    #[serde(default, deserialize_with = "double_option")]
    pub thumbnail_url: Option<Option<String>>,
}

/// An image together with the categories and tags it references.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDetail {
    pub image: Image,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}

/// Where and under which name the browser should download an image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DownloadLink {
    pub file_name: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_type_from_extension() {
        assert_eq!(ImageType::from_extension("SVG"), Some(ImageType::Svg));
        assert_eq!(ImageType::from_extension(".jpeg"), Some(ImageType::Jpeg));
        assert_eq!(ImageType::from_extension("tiff"), None);
    }

    #[test]
    fn test_image_type_from_url() {
        assert_eq!(
            ImageType::from_url("https://example.com/docs/manual.PDF?dl=1"),
            Some(ImageType::Pdf)
        );
        assert_eq!(ImageType::from_url("/public/vite.svg"), Some(ImageType::Svg));
        assert_eq!(
            ImageType::from_url("https://images.unsplash.com/photo-1506905925346"),
            None
        );
    }

    #[test]
    fn test_image_serializes_type_field() {
        let image = Image {
            id: "img1".to_string(),
            name: "React Logo".to_string(),
            description: String::new(),
            kind: ImageType::Svg,
            url: "/src/assets/react.svg".to_string(),
            category_ids: vec!["c1".to_string()],
            tag_ids: vec![],
            thumbnail_url: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["type"], "svg");
        assert_eq!(json["categoryIds"][0], "c1");
        assert!(json.get("thumbnailUrl").is_none());
        assert_eq!(image.download_file_name(), "React Logo.svg");
    }

    #[test]
    fn test_update_thumbnail_absent_vs_null() {
        let absent: UpdateImageRequest = serde_json::from_str(r#"{"name":"Logo"}"#).unwrap();
        assert_eq!(absent.thumbnail_url, None);

        let cleared: UpdateImageRequest =
            serde_json::from_str(r#"{"thumbnailUrl":null}"#).unwrap();
        assert_eq!(cleared.thumbnail_url, Some(None));

        let set: UpdateImageRequest =
            serde_json::from_str(r#"{"thumbnailUrl":"/thumbs/logo.png"}"#).unwrap();
        assert_eq!(set.thumbnail_url, Some(Some("/thumbs/logo.png".to_string())));
    }
}
