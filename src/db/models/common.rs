//! Shared types used across content models.

use serde::{Deserialize, Serialize};

/// Supported content languages: English, Amharic, Afaan Oromo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Am,
    Om,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Am, Language::Om];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Am => "am",
            Language::Om => "om",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "am" => Ok(Language::Am),
            "om" => Ok(Language::Om),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gallery image category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryCategory {
    Hotel,
    Tour,
    Experience,
    Other,
}

impl GalleryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            GalleryCategory::Hotel => "hotel",
            GalleryCategory::Tour => "tour",
            GalleryCategory::Experience => "experience",
            GalleryCategory::Other => "other",
        }
    }
}

impl std::str::FromStr for GalleryCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hotel" => Ok(GalleryCategory::Hotel),
            "tour" => Ok(GalleryCategory::Tour),
            "experience" => Ok(GalleryCategory::Experience),
            "other" => Ok(GalleryCategory::Other),
            other => Err(format!("Unknown gallery category: {}", other)),
        }
    }
}

/// Serialize a language-keyed contents map for storage.
pub fn serialize_contents<T: Serialize>(contents: &T) -> String {
    serde_json::to_string(contents).unwrap_or_else(|_| "{}".to_string())
}

/// Parse a JSON array of image URLs stored as TEXT.
pub fn parse_images(json: &str) -> Vec<String> {
    serde_json::from_str(json).unwrap_or_default()
}

/// Serialize image URLs for storage.
pub fn serialize_images(images: &[String]) -> String {
    serde_json::to_string(images).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_round_trip() {
        for lang in Language::ALL {
            assert_eq!(lang.as_str().parse::<Language>().unwrap(), lang);
        }
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_as_json_map_key() {
        let mut map = std::collections::HashMap::new();
        map.insert(Language::En, "Home");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"en":"Home"}"#);

        let back: std::collections::HashMap<Language, String> =
            serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(&Language::En).map(String::as_str), Some("Home"));
    }

    #[test]
    fn test_gallery_category_round_trip() {
        for category in [
            GalleryCategory::Hotel,
            GalleryCategory::Tour,
            GalleryCategory::Experience,
            GalleryCategory::Other,
        ] {
            assert_eq!(
                category.as_str().parse::<GalleryCategory>().unwrap(),
                category
            );
        }
        assert!("castle".parse::<GalleryCategory>().is_err());
    }

    #[test]
    fn test_images_round_trip() {
        let images = vec!["https://example.com/a.jpg".to_string()];
        assert_eq!(parse_images(&serialize_images(&images)), images);
        assert!(parse_images("not-json").is_empty());
    }
}
