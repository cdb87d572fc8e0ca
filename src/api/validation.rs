//! Input validation for API requests.
//!
//! Structural validation runs before any store access; a failure
//! short-circuits the handler with a 400 listing every violated field.
//! For collecting multiple errors use the `ValidationErrorBuilder` from
//! the `error` module.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// URL-safe lowercase slug: "skyline-addis", "about-us"
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();

    /// Translation key: slug segments joined by '.', '_' or '-': "nav.home"
    static ref TRANSLATION_KEY_REGEX: Regex =
        Regex::new(r"^[a-z0-9]+([._-][a-z0-9]+)*$").unwrap();

    /// Pragmatic email shape check; real validation happens at delivery time
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();

    /// Loose international phone number: digits with optional +, spaces,
    /// dashes and parentheses
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9][0-9 ().-]{5,19}$").unwrap();
}

/// Validate an entity slug
pub fn validate_slug(slug: &str) -> Result<(), String> {
    if slug.is_empty() {
        return Err("Slug is required".to_string());
    }

    if slug.len() > 128 {
        return Err("Slug is too long (max 128 characters)".to_string());
    }

    if !SLUG_REGEX.is_match(slug) {
        return Err(
            "Slug must be lowercase alphanumeric with dashes, starting and ending with alphanumeric"
                .to_string(),
        );
    }

    Ok(())
}

/// Validate a translation key
pub fn validate_translation_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err("Key is required".to_string());
    }

    if key.len() > 128 {
        return Err("Key is too long (max 128 characters)".to_string());
    }

    if !TRANSLATION_KEY_REGEX.is_match(key) {
        return Err("Key must be lowercase segments joined by '.', '_' or '-'".to_string());
    }

    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email is too long (max 254 characters)".to_string());
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err("Invalid email address".to_string());
    }

    Ok(())
}

/// Validate an optional phone number
pub fn validate_phone(phone: &Option<String>) -> Result<(), String> {
    if let Some(p) = phone {
        if p.is_empty() {
            return Ok(()); // Empty string treated as no phone
        }

        if !PHONE_REGEX.is_match(p) {
            return Err("Invalid phone number format".to_string());
        }
    }

    Ok(())
}

/// Validate a gallery image URL. Only http(s) and inline image data URIs
/// are accepted; everything else (javascript:, file:, ftp:) is rejected.
pub fn validate_image_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("URL is required".to_string());
    }

    if url.starts_with("http://") || url.starts_with("https://") {
        return Ok(());
    }

    if url.starts_with("data:image/") {
        return Ok(());
    }

    Err("URL must be http(s) or an inline data:image URI".to_string())
}

/// Validate a contact message body
pub fn validate_message_body(message: &str) -> Result<(), String> {
    if message.trim().len() < 10 {
        return Err("Message must be at least 10 characters".to_string());
    }

    if message.len() > 10_000 {
        return Err("Message is too long (max 10000 characters)".to_string());
    }

    Ok(())
}

/// Validate a required, non-empty text field
pub fn validate_required(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field_name));
    }

    Ok(())
}

/// Validate a star rating
pub fn validate_rating(rating: f64) -> Result<(), String> {
    if !(0.0..=5.0).contains(&rating) {
        return Err("Rating must be between 0 and 5".to_string());
    }

    Ok(())
}

/// Validate a non-negative price
pub fn validate_price(price: f64, field_name: &str) -> Result<(), String> {
    if price < 0.0 || !price.is_finite() {
        return Err(format!("{} must be a non-negative number", field_name));
    }

    Ok(())
}

/// Validate a tour duration in days
pub fn validate_duration(duration: i64) -> Result<(), String> {
    if duration < 1 {
        return Err("Duration must be at least 1 day".to_string());
    }

    Ok(())
}

/// Validate group size bounds
pub fn validate_group_size(min: i64, max: i64) -> Result<(), String> {
    if min < 1 {
        return Err("Minimum group size must be at least 1".to_string());
    }

    if max < min {
        return Err("Maximum group size must not be below the minimum".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("skyline-addis").is_ok());
        assert!(validate_slug("about").is_ok());
        assert!(validate_slug("tour-2024").is_ok());

        assert!(validate_slug("").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug("Upper").is_err());
        assert!(validate_slug("under_score").is_err());
        assert!(validate_slug("with space").is_err());
    }

    #[test]
    fn test_validate_translation_key() {
        assert!(validate_translation_key("nav.home").is_ok());
        assert!(validate_translation_key("footer.contact_us").is_ok());
        assert!(validate_translation_key("hero-title").is_ok());

        assert!(validate_translation_key("").is_err());
        assert!(validate_translation_key("Nav.Home").is_err());
        assert!(validate_translation_key(".leading").is_err());
        assert!(validate_translation_key("trailing.").is_err());
        assert!(validate_translation_key("double..dot").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("guest@example.com").is_ok());
        assert!(validate_email("a.b+c@sub.example.org").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("two@@example.com").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone(&Some("+251911123456".to_string())).is_ok());
        assert!(validate_phone(&Some("(011) 123-4567".to_string())).is_err()); // starts with '('
        assert!(validate_phone(&Some("011 123 4567".to_string())).is_ok());
        assert!(validate_phone(&None).is_ok());
        assert!(validate_phone(&Some(String::new())).is_ok());

        assert!(validate_phone(&Some("call me".to_string())).is_err());
    }

    #[test]
    fn test_validate_image_url() {
        assert!(validate_image_url("https://example.com/a.jpg").is_ok());
        assert!(validate_image_url("http://example.com/a.jpg").is_ok());
        assert!(validate_image_url("data:image/png;base64,AAAA").is_ok());

        assert!(validate_image_url("").is_err());
        assert!(validate_image_url("javascript:alert(1)").is_err());
        assert!(validate_image_url("file:///etc/passwd").is_err());
        assert!(validate_image_url("ftp://example.com/a.jpg").is_err());
        assert!(validate_image_url("data:text/html,<h1>").is_err());
    }

    #[test]
    fn test_validate_message_body() {
        assert!(validate_message_body("I would like to book a room.").is_ok());
        assert!(validate_message_body("short").is_err());
        assert!(validate_message_body("         x").is_err()); // trimmed length counts
    }

    #[test]
    fn test_validate_rating_and_price() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(4.5).is_ok());
        assert!(validate_rating(5.0).is_ok());
        assert!(validate_rating(5.1).is_err());
        assert!(validate_rating(-0.1).is_err());

        assert!(validate_price(0.0, "price_per_night").is_ok());
        assert!(validate_price(120.5, "price_per_night").is_ok());
        assert!(validate_price(-1.0, "price_per_night").is_err());
        assert!(validate_price(f64::NAN, "price_per_night").is_err());
    }

    #[test]
    fn test_validate_duration_and_group_size() {
        assert!(validate_duration(1).is_ok());
        assert!(validate_duration(14).is_ok());
        assert!(validate_duration(0).is_err());

        assert!(validate_group_size(1, 1).is_ok());
        assert!(validate_group_size(2, 12).is_ok());
        assert!(validate_group_size(0, 5).is_err());
        assert!(validate_group_size(6, 5).is_err());
    }
}
