//! Tour models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

use super::common::{parse_images, Language};

/// Language-specific tour content block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TourContent {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub itinerary: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tour {
    pub id: String,
    pub slug: String,
    /// JSON object keyed by language code
    pub contents: String,
    /// Duration in days
    pub duration: i64,
    pub price_per_person: f64,
    pub group_min: i64,
    pub group_max: i64,
    /// JSON array of image URLs
    pub images: String,
    pub destination: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub is_published: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl Tour {
    pub fn get_contents(&self) -> HashMap<Language, TourContent> {
        serde_json::from_str(&self.contents).unwrap_or_default()
    }

    pub fn get_images(&self) -> Vec<String> {
        parse_images(&self.images)
    }

    pub fn to_response(&self) -> TourResponse {
        TourResponse {
            id: self.id.clone(),
            slug: self.slug.clone(),
            contents: self.get_contents(),
            duration: self.duration,
            price_per_person: self.price_per_person,
            group_size: GroupSize {
                min: self.group_min,
                max: self.group_max,
            },
            images: self.get_images(),
            destination: self.destination.clone(),
            seo_title: self.seo_title.clone(),
            seo_description: self.seo_description.clone(),
            is_published: self.is_published != 0,
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupSize {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourResponse {
    pub id: String,
    pub slug: String,
    pub contents: HashMap<Language, TourContent>,
    pub duration: i64,
    pub price_per_person: f64,
    pub group_size: GroupSize,
    pub images: Vec<String>,
    pub destination: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub is_published: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTourRequest {
    pub slug: String,
    pub contents: HashMap<Language, TourContent>,
    pub duration: i64,
    pub price_per_person: f64,
    #[serde(default = "default_group_size")]
    pub group_size: GroupSize,
    #[serde(default)]
    pub images: Vec<String>,
    pub destination: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    #[serde(default = "super::default_published")]
    pub is_published: bool,
}

fn default_group_size() -> GroupSize {
    GroupSize { min: 1, max: 1 }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateTourRequest {
    pub slug: Option<String>,
    pub contents: Option<HashMap<Language, TourContent>>,
    pub duration: Option<i64>,
    pub price_per_person: Option<f64>,
    pub group_size: Option<GroupSize>,
    pub images: Option<Vec<String>>,
    pub destination: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub is_published: Option<bool>,
}
