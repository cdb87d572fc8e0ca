//! Tour CRUD endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{
    serialize_contents, serialize_images, Admin, CreateTourRequest, Tour, TourResponse,
    UpdateTourRequest,
};
use crate::AppState;

use super::auth::MaybeAdmin;
use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{
    validate_duration, validate_group_size, validate_price, validate_required, validate_slug,
};

fn validate_create_request(req: &CreateTourRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_slug(&req.slug) {
        errors.add("slug", e);
    }
    if req.contents.is_empty() {
        errors.add("contents", "At least one language content block is required");
    }
    if let Err(e) = validate_duration(req.duration) {
        errors.add("duration", e);
    }
    if let Err(e) = validate_price(req.price_per_person, "Price per person") {
        errors.add("price_per_person", e);
    }
    if let Err(e) = validate_group_size(req.group_size.min, req.group_size.max) {
        errors.add("group_size", e);
    }
    if let Err(e) = validate_required(&req.destination, "Destination") {
        errors.add("destination", e);
    }

    errors.finish()
}

fn validate_update_request(req: &UpdateTourRequest) -> Result<(), ApiError> {
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
    if let Some(duration) = req.duration {
        if let Err(e) = validate_duration(duration) {
            errors.add("duration", e);
        }
    }
    if let Some(price) = req.price_per_person {
        if let Err(e) = validate_price(price, "Price per person") {
            errors.add("price_per_person", e);
        }
    }
    if let Some(group) = req.group_size {
        if let Err(e) = validate_group_size(group.min, group.max) {
            errors.add("group_size", e);
        }
    }

    errors.finish()
}

/// List tours; unpublished tours appear only for authenticated admins.
///
/// GET /api/tours
pub async fn list_tours(
    State(state): State<Arc<AppState>>,
    MaybeAdmin(admin): MaybeAdmin,
) -> Result<Json<Vec<TourResponse>>, ApiError> {
    let tours: Vec<Tour> = if admin.is_some() {
        sqlx::query_as("SELECT * FROM tours ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?
    } else {
        sqlx::query_as("SELECT * FROM tours WHERE is_published = 1 ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?
    };

    Ok(Json(tours.iter().map(Tour::to_response).collect()))
}

/// Get one published tour by slug
///
/// GET /api/tours/:slug
pub async fn get_tour_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<TourResponse>, ApiError> {
    let tour: Option<Tour> =
        sqlx::query_as("SELECT * FROM tours WHERE slug = ? AND is_published = 1")
            .bind(&slug)
            .fetch_optional(&state.db)
            .await?;

    match tour {
        Some(t) => Ok(Json(t.to_response())),
        None => Err(ApiError::not_found("Tour not found")),
    }
}

/// Create a tour (admin only)
///
/// POST /api/tours
pub async fn create_tour(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Json(req): Json<CreateTourRequest>,
) -> Result<(StatusCode, Json<TourResponse>), ApiError> {
    validate_create_request(&req)?;

    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO tours (
            id, slug, contents, duration, price_per_person, group_min, group_max,
            images, destination, seo_title, seo_description, is_published,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.slug)
    .bind(serialize_contents(&req.contents))
    .bind(req.duration)
    .bind(req.price_per_person)
    .bind(req.group_size.min)
    .bind(req.group_size.max)
    .bind(serialize_images(&req.images))
    .bind(&req.destination)
    .bind(&req.seo_title)
    .bind(&req.seo_description)
    .bind(req.is_published as i64)
    .bind(&now)
    .bind(&now)
    .execute(&state.db)
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            ApiError::conflict("A tour with this slug already exists")
        } else {
            tracing::error!("Failed to create tour: {}", e);
            ApiError::database("Failed to create tour")
        }
    })?;

    let tour: Tour = sqlx::query_as("SELECT * FROM tours WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    Ok((StatusCode::CREATED, Json(tour.to_response())))
}

/// Update a tour (admin only). Absent fields keep their stored values.
///
/// PUT /api/tours/:id
pub async fn update_tour(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Path(id): Path<String>,
    Json(req): Json<UpdateTourRequest>,
) -> Result<Json<TourResponse>, ApiError> {
    validate_update_request(&req)?;

    let _existing: Tour = sqlx::query_as("SELECT * FROM tours WHERE id = ?")
        .bind(&id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Tour not found"))?;

    let now = chrono::Utc::now().to_rfc3339();
    let contents = req.contents.as_ref().map(serialize_contents);
    let images = req.images.as_deref().map(serialize_images);

    sqlx::query(
        r#"
        UPDATE tours SET
            slug = COALESCE(?, slug),
            contents = COALESCE(?, contents),
            duration = COALESCE(?, duration),
            price_per_person = COALESCE(?, price_per_person),
            group_min = COALESCE(?, group_min),
            group_max = COALESCE(?, group_max),
            images = COALESCE(?, images),
            destination = COALESCE(?, destination),
            seo_title = COALESCE(?, seo_title),
            seo_description = COALESCE(?, seo_description),
            is_published = COALESCE(?, is_published),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&req.slug)
    .bind(&contents)
    .bind(req.duration)
    .bind(req.price_per_person)
    .bind(req.group_size.map(|g| g.min))
    .bind(req.group_size.map(|g| g.max))
    .bind(&images)
    .bind(&req.destination)
    .bind(&req.seo_title)
    .bind(&req.seo_description)
    .bind(req.is_published.map(|p| p as i64))
    .bind(&now)
    .bind(&id)
    .execute(&state.db)
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            ApiError::conflict("A tour with this slug already exists")
        } else {
            tracing::error!("Failed to update tour: {}", e);
            ApiError::database("Failed to update tour")
        }
    })?;

    let tour: Tour = sqlx::query_as("SELECT * FROM tours WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(tour.to_response()))
}

/// Delete a tour (admin only). Hard delete.
///
/// DELETE /api/tours/:id
pub async fn delete_tour(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = sqlx::query("DELETE FROM tours WHERE id = ?")
        .bind(&id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Tour not found"));
    }

    Ok(Json(serde_json::json!({ "message": "Tour deleted" })))
}
