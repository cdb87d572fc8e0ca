//! Gallery image models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::common::GalleryCategory;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GalleryImage {
    pub id: String,
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub sort_order: i64,
    pub is_published: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImageResponse {
    pub id: String,
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub sort_order: i64,
    pub is_published: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<GalleryImage> for GalleryImageResponse {
    fn from(image: GalleryImage) -> Self {
        Self {
            id: image.id,
            url: image.url,
            title: image.title,
            description: image.description,
            category: image.category,
            sort_order: image.sort_order,
            is_published: image.is_published != 0,
            created_at: image.created_at,
            updated_at: image.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGalleryImageRequest {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub category: GalleryCategory,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default = "super::default_published")]
    pub is_published: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateGalleryImageRequest {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<GalleryCategory>,
    pub sort_order: Option<i64>,
    pub is_published: Option<bool>,
}
