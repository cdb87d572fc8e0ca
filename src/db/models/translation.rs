//! UI translation models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::common::Language;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Translation {
    pub id: String,
    pub key: String,
    pub language: String,
    pub value: String,
    pub category: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Create-or-overwrite request; repeated calls with the same (key, language)
/// replace the stored value.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpsertTranslationRequest {
    pub key: String,
    pub language: Language,
    pub value: String,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "common".to_string()
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateTranslationRequest {
    pub value: Option<String>,
    pub category: Option<String>,
}
