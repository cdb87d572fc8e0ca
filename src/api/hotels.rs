//! Hotel CRUD endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{
    serialize_contents, serialize_images, Admin, CreateHotelRequest, Hotel, HotelResponse,
    UpdateHotelRequest,
};
use crate::AppState;

use super::auth::MaybeAdmin;
use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{validate_price, validate_rating, validate_required, validate_slug};

fn validate_create_request(req: &CreateHotelRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_slug(&req.slug) {
        errors.add("slug", e);
    }
    if req.contents.is_empty() {
        errors.add("contents", "At least one language content block is required");
    }
    if let Err(e) = validate_required(&req.location, "Location") {
        errors.add("location", e);
    }
    if let Err(e) = validate_price(req.price_per_night, "Price per night") {
        errors.add("price_per_night", e);
    }
    if let Err(e) = validate_rating(req.rating) {
        errors.add("rating", e);
    }

    errors.finish()
}

fn validate_update_request(req: &UpdateHotelRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Some(ref slug) = req.slug {
        if let Err(e) = validate_slug(slug) {
            errors.add("slug", e);
        }
    }
    if let Some(ref contents) = req.contents {
        if contents.is_empty() {
            errors.add("contents", "At least one language content block is required");
        }
    }
    if let Some(price) = req.price_per_night {
        if let Err(e) = validate_price(price, "Price per night") {
            errors.add("price_per_night", e);
        }
    }
    if let Some(rating) = req.rating {
        if let Err(e) = validate_rating(rating) {
            errors.add("rating", e);
        }
    }

    errors.finish()
}

/// List hotels. Anonymous callers see published hotels only; an
/// authenticated admin also sees unpublished ones.
///
/// GET /api/hotels
pub async fn list_hotels(
    State(state): State<Arc<AppState>>,
    MaybeAdmin(admin): MaybeAdmin,
) -> Result<Json<Vec<HotelResponse>>, ApiError> {
    let hotels: Vec<Hotel> = if admin.is_some() {
        sqlx::query_as("SELECT * FROM hotels ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?
    } else {
        sqlx::query_as("SELECT * FROM hotels WHERE is_published = 1 ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?
    };

    Ok(Json(hotels.iter().map(Hotel::to_response).collect()))
}

/// Get one published hotel by slug. Unpublished hotels are never visible
/// through this path.
///
/// GET /api/hotels/:slug
pub async fn get_hotel_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<HotelResponse>, ApiError> {
    let hotel: Option<Hotel> =
        sqlx::query_as("SELECT * FROM hotels WHERE slug = ? AND is_published = 1")
            .bind(&slug)
            .fetch_optional(&state.db)
            .await?;

    match hotel {
        Some(h) => Ok(Json(h.to_response())),
        None => Err(ApiError::not_found("Hotel not found")),
    }
}

/// Create a hotel (admin only)
///
/// POST /api/hotels
pub async fn create_hotel(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Json(req): Json<CreateHotelRequest>,
) -> Result<(StatusCode, Json<HotelResponse>), ApiError> {
    validate_create_request(&req)?;

    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO hotels (
            id, slug, contents, location, price_per_night, images, rating,
            reviews, seo_title, seo_description, is_published, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.slug)
    .bind(serialize_contents(&req.contents))
    .bind(&req.location)
    .bind(req.price_per_night)
    .bind(serialize_images(&req.images))
    .bind(req.rating)
    .bind(req.reviews)
    .bind(&req.seo_title)
    .bind(&req.seo_description)
    .bind(req.is_published as i64)
    .bind(&now)
    .bind(&now)
    .execute(&state.db)
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            ApiError::conflict("A hotel with this slug already exists")
        } else {
            tracing::error!("Failed to create hotel: {}", e);
            ApiError::database("Failed to create hotel")
        }
    })?;

    let hotel: Hotel = sqlx::query_as("SELECT * FROM hotels WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    Ok((StatusCode::CREATED, Json(hotel.to_response())))
}

/// Update a hotel (admin only). Absent fields keep their stored values.
///
/// PUT /api/hotels/:id
pub async fn update_hotel(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Path(id): Path<String>,
    Json(req): Json<UpdateHotelRequest>,
) -> Result<Json<HotelResponse>, ApiError> {
    validate_update_request(&req)?;

    let _existing: Hotel = sqlx::query_as("SELECT * FROM hotels WHERE id = ?")
        .bind(&id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Hotel not found"))?;

    let now = chrono::Utc::now().to_rfc3339();
    let contents = req.contents.as_ref().map(serialize_contents);
    let images = req.images.as_deref().map(serialize_images);

    sqlx::query(
        r#"
        UPDATE hotels SET
            slug = COALESCE(?, slug),
            contents = COALESCE(?, contents),
            location = COALESCE(?, location),
            price_per_night = COALESCE(?, price_per_night),
            images = COALESCE(?, images),
            rating = COALESCE(?, rating),
            reviews = COALESCE(?, reviews),
            seo_title = COALESCE(?, seo_title),
            seo_description = COALESCE(?, seo_description),
            is_published = COALESCE(?, is_published),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&req.slug)
    .bind(&contents)
    .bind(&req.location)
    .bind(req.price_per_night)
    .bind(&images)
    .bind(req.rating)
    .bind(req.reviews)
    .bind(&req.seo_title)
    .bind(&req.seo_description)
    .bind(req.is_published.map(|p| p as i64))
    .bind(&now)
    .bind(&id)
    .execute(&state.db)
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            ApiError::conflict("A hotel with this slug already exists")
        } else {
            tracing::error!("Failed to update hotel: {}", e);
            ApiError::database("Failed to update hotel")
        }
    })?;

    let hotel: Hotel = sqlx::query_as("SELECT * FROM hotels WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(hotel.to_response()))
}

/// Delete a hotel (admin only). Hard delete.
///
/// DELETE /api/hotels/:id
pub async fn delete_hotel(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = sqlx::query("DELETE FROM hotels WHERE id = ?")
        .bind(&id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Hotel not found"));
    }

    Ok(Json(serde_json::json!({ "message": "Hotel deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::{test_pool, HotelContent, Language};
    use std::collections::HashMap;

    fn sample_contents() -> HashMap<Language, HotelContent> {
        let mut contents = HashMap::new();
        contents.insert(
            Language::En,
            HotelContent {
                name: "Skyline Addis".to_string(),
                description: "A quiet hotel near the old town.".to_string(),
                amenities: vec!["wifi".to_string(), "breakfast".to_string()],
            },
        );
        contents
    }

    fn sample_create(slug: &str, published: bool) -> CreateHotelRequest {
        CreateHotelRequest {
            slug: slug.to_string(),
            contents: sample_contents(),
            location: "Addis Ababa".to_string(),
            price_per_night: 85.0,
            images: vec!["https://example.com/a.jpg".to_string()],
            rating: 4.5,
            reviews: 12,
            seo_title: None,
            seo_description: None,
            is_published: published,
        }
    }

    async fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(Config::default(), test_pool().await))
    }

    async fn insert_admin(state: &AppState) -> Admin {
        let now = chrono::Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO admins (id, email, password_hash, name, role, is_active, created_at, updated_at)
             VALUES ('a1', 'admin@example.com', 'x', 'Admin', 'admin', 1, ?, ?)",
        )
        .bind(&now)
        .bind(&now)
        .execute(&state.db)
        .await
        .unwrap();
        sqlx::query_as("SELECT * FROM admins WHERE id = 'a1'")
            .fetch_one(&state.db)
            .await
            .unwrap()
    }

    #[test]
    fn test_create_validation_rejects_bad_fields() {
        let mut req = sample_create("Bad Slug", true);
        req.rating = 7.0;
        req.location = String::new();
        req.contents.clear();

        let err = validate_create_request(&req).unwrap_err();
        assert_eq!(err.status().as_u16(), 400);
        assert_eq!(err.field_errors().len(), 4);
    }

    #[tokio::test]
    async fn test_anonymous_list_excludes_unpublished() {
        let state = test_state().await;
        let admin = insert_admin(&state).await;

        create_hotel(
            State(state.clone()),
            admin.clone(),
            Json(sample_create("visible-hotel", true)),
        )
        .await
        .unwrap();
        create_hotel(
            State(state.clone()),
            admin.clone(),
            Json(sample_create("draft-hotel", false)),
        )
        .await
        .unwrap();

        let Json(public) = list_hotels(State(state.clone()), MaybeAdmin(None))
            .await
            .unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].slug, "visible-hotel");

        let Json(all) = list_hotels(State(state), MaybeAdmin(Some(admin)))
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_get_by_slug_hides_unpublished() {
        let state = test_state().await;
        let admin = insert_admin(&state).await;

        create_hotel(
            State(state.clone()),
            admin,
            Json(sample_create("draft-hotel", false)),
        )
        .await
        .unwrap();

        let err = get_hotel_by_slug(State(state), Path("draft-hotel".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status().as_u16(), 404);
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_conflict() {
        let state = test_state().await;
        let admin = insert_admin(&state).await;

        create_hotel(
            State(state.clone()),
            admin.clone(),
            Json(sample_create("skyline-addis", true)),
        )
        .await
        .unwrap();

        let err = create_hotel(
            State(state),
            admin,
            Json(sample_create("skyline-addis", true)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status().as_u16(), 409);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let state = test_state().await;
        let admin = insert_admin(&state).await;

        let (_, Json(created)) = create_hotel(
            State(state.clone()),
            admin.clone(),
            Json(sample_create("skyline-addis", true)),
        )
        .await
        .unwrap();

        let Json(updated) = update_hotel(
            State(state),
            admin,
            Path(created.id.clone()),
            Json(UpdateHotelRequest {
                price_per_night: Some(99.0),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        assert_eq!(updated.price_per_night, 99.0);
        assert_eq!(updated.slug, "skyline-addis");
        assert_eq!(updated.location, "Addis Ababa");
        assert_eq!(
            updated.contents.get(&Language::En).unwrap().name,
            "Skyline Addis"
        );
    }
}
