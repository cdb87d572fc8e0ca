//! Hotel models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

use super::common::{parse_images, Language};

/// Language-specific hotel content block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotelContent {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Hotel {
    pub id: String,
    pub slug: String,
    /// JSON object keyed by language code
    pub contents: String,
    pub location: String,
    pub price_per_night: f64,
    /// JSON array of image URLs
    pub images: String,
    pub rating: f64,
    pub reviews: i64,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub is_published: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl Hotel {
    pub fn get_contents(&self) -> HashMap<Language, HotelContent> {
        serde_json::from_str(&self.contents).unwrap_or_default()
    }

    pub fn get_images(&self) -> Vec<String> {
        parse_images(&self.images)
    }

    pub fn to_response(&self) -> HotelResponse {
        HotelResponse {
            id: self.id.clone(),
            slug: self.slug.clone(),
            contents: self.get_contents(),
            location: self.location.clone(),
            price_per_night: self.price_per_night,
            images: self.get_images(),
            rating: self.rating,
            reviews: self.reviews,
            seo_title: self.seo_title.clone(),
            seo_description: self.seo_description.clone(),
            is_published: self.is_published != 0,
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelResponse {
    pub id: String,
    pub slug: String,
    pub contents: HashMap<Language, HotelContent>,
    pub location: String,
    pub price_per_night: f64,
    pub images: Vec<String>,
    pub rating: f64,
    pub reviews: i64,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub is_published: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateHotelRequest {
    pub slug: String,
    pub contents: HashMap<Language, HotelContent>,
    pub location: String,
    pub price_per_night: f64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: i64,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    #[serde(default = "super::default_published")]
    pub is_published: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateHotelRequest {
    pub slug: Option<String>,
    pub contents: Option<HashMap<Language, HotelContent>>,
    pub location: Option<String>,
    pub price_per_night: Option<f64>,
    pub images: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub reviews: Option<i64>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub is_published: Option<bool>,
}
