//! Gallery image endpoints. Images are standalone records ordered by
//! `sort_order`, optionally filtered by category.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{
    Admin, CreateGalleryImageRequest, GalleryCategory, GalleryImage, GalleryImageResponse,
    UpdateGalleryImageRequest,
};
use crate::AppState;

use super::auth::MaybeAdmin;
use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{validate_image_url, validate_required};

/// The category arrives as a raw string so an unknown value gets the same
/// validation envelope as every other bad input.
#[derive(Debug, Default, Deserialize)]
pub struct GalleryQuery {
    pub category: Option<String>,
}

fn validate_create_request(req: &CreateGalleryImageRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_image_url(&req.url) {
        errors.add("url", e);
    }
    if let Err(e) = validate_required(&req.title, "Title") {
        errors.add("title", e);
    }

    errors.finish()
}

fn validate_update_request(req: &UpdateGalleryImageRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Some(ref url) = req.url {
        if let Err(e) = validate_image_url(url) {
            errors.add("url", e);
        }
    }
    if let Some(ref title) = req.title {
        if let Err(e) = validate_required(title, "Title") {
            errors.add("title", e);
        }
    }

    errors.finish()
}

/// List gallery images in display order, optionally filtered by category.
/// Unpublished images appear only for authenticated admins.
///
/// GET /api/gallery?category=hotel
pub async fn list_gallery_images(
    State(state): State<Arc<AppState>>,
    MaybeAdmin(admin): MaybeAdmin,
    Query(query): Query<GalleryQuery>,
) -> Result<Json<Vec<GalleryImageResponse>>, ApiError> {
    let category: Option<GalleryCategory> = query
        .category
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(|e: String| ApiError::validation_field("category", e))?;

    let mut sql = String::from("SELECT * FROM gallery_images WHERE 1 = 1");
    if admin.is_none() {
        sql.push_str(" AND is_published = 1");
    }
    if category.is_some() {
        sql.push_str(" AND category = ?");
    }
    sql.push_str(" ORDER BY sort_order ASC, created_at ASC");

    let mut stmt = sqlx::query_as::<_, GalleryImage>(&sql);
    if let Some(category) = category {
        stmt = stmt.bind(category.as_str());
    }
    let images = stmt.fetch_all(&state.db).await?;

    Ok(Json(
        images.into_iter().map(GalleryImageResponse::from).collect(),
    ))
}

/// Add a gallery image (admin only)
///
/// POST /api/gallery
pub async fn create_gallery_image(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Json(req): Json<CreateGalleryImageRequest>,
) -> Result<(StatusCode, Json<GalleryImageResponse>), ApiError> {
    validate_create_request(&req)?;

    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO gallery_images (
            id, url, title, description, category, sort_order, is_published,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.url)
    .bind(&req.title)
    .bind(&req.description)
    .bind(req.category.as_str())
    .bind(req.sort_order)
    .bind(req.is_published as i64)
    .bind(&now)
    .bind(&now)
    .execute(&state.db)
    .await?;

    let image: GalleryImage = sqlx::query_as("SELECT * FROM gallery_images WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    Ok((StatusCode::CREATED, Json(image.into())))
}

/// Update a gallery image (admin only). Absent fields keep their stored values.
///
/// PUT /api/gallery/:id
pub async fn update_gallery_image(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Path(id): Path<String>,
    Json(req): Json<UpdateGalleryImageRequest>,
) -> Result<Json<GalleryImageResponse>, ApiError> {
    validate_update_request(&req)?;

    let _existing: GalleryImage = sqlx::query_as("SELECT * FROM gallery_images WHERE id = ?")
        .bind(&id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Gallery image not found"))?;

    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        UPDATE gallery_images SET
            url = COALESCE(?, url),
            title = COALESCE(?, title),
            description = COALESCE(?, description),
            category = COALESCE(?, category),
            sort_order = COALESCE(?, sort_order),
            is_published = COALESCE(?, is_published),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&req.url)
    .bind(&req.title)
    .bind(&req.description)
    .bind(req.category.map(|c| c.as_str()))
    .bind(req.sort_order)
    .bind(req.is_published.map(|p| p as i64))
    .bind(&now)
    .bind(&id)
    .execute(&state.db)
    .await?;

    let image: GalleryImage = sqlx::query_as("SELECT * FROM gallery_images WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(image.into()))
}

/// Delete a gallery image (admin only). Hard delete.
///
/// DELETE /api/gallery/:id
pub async fn delete_gallery_image(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = sqlx::query("DELETE FROM gallery_images WHERE id = ?")
        .bind(&id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Gallery image not found"));
    }

    Ok(Json(serde_json::json!({ "message": "Gallery image deleted" })))
}
