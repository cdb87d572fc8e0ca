//! Static page models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

use super::common::Language;

/// Language-specific page content block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageContent {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Page {
    pub id: String,
    pub slug: String,
    pub title: String,
    /// JSON object keyed by language code
    pub contents: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub is_published: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl Page {
    pub fn get_contents(&self) -> HashMap<Language, PageContent> {
        serde_json::from_str(&self.contents).unwrap_or_default()
    }

    pub fn to_response(&self) -> PageResponse {
        PageResponse {
            id: self.id.clone(),
            slug: self.slug.clone(),
            title: self.title.clone(),
            contents: self.get_contents(),
            seo_title: self.seo_title.clone(),
            seo_description: self.seo_description.clone(),
            is_published: self.is_published != 0,
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub contents: HashMap<Language, PageContent>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub is_published: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePageRequest {
    pub slug: String,
    pub title: String,
    pub contents: HashMap<Language, PageContent>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    #[serde(default = "super::default_published")]
    pub is_published: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdatePageRequest {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub contents: Option<HashMap<Language, PageContent>>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub is_published: Option<bool>,
}
