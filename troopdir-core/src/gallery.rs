//! Photo gallery metadata records.
//!
//! Only the metadata lives here; the image bytes live with the external
//! content host and are referenced by URL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::generate_id;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: String,
    pub title: String,
    /// Public URL at the content host.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default)]
    pub caption: String,
    pub uploaded_at: DateTime<Utc>,
}

impl GalleryImage {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        GalleryImage {
            id: generate_id("image"),
            title: title.into(),
            url: url.into(),
            album: None,
            caption: String::new(),
            uploaded_at: Utc::now(),
        }
    }
}

/// Store key for a gallery image record.
pub fn gallery_key(image_id: &str) -> String {
    format!("gallery/images/{image_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_image() {
        let image = GalleryImage::new("Hike", "https://images.example.com/hike.jpg");
        assert!(image.id.starts_with("image-"));
        assert!(gallery_key(&image.id).starts_with("gallery/images/image-"));
    }
}
