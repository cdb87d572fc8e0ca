//! UI translation endpoints.
//!
//! The public read path returns one language as a flat key/value map, which
//! is what the frontend i18n layer consumes directly. Writes go through an
//! idempotent upsert keyed on (key, language).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{
    Admin, Language, Translation, UpdateTranslationRequest, UpsertTranslationRequest,
};
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{validate_required, validate_translation_key};

fn validate_upsert_request(req: &UpsertTranslationRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_translation_key(&req.key) {
        errors.add("key", e);
    }
    if let Err(e) = validate_required(&req.value, "Value") {
        errors.add("value", e);
    }
    if let Err(e) = validate_required(&req.category, "Category") {
        errors.add("category", e);
    }

    errors.finish()
}

/// All translation rows, for the admin editing screen.
///
/// GET /api/translations
pub async fn list_translations(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
) -> Result<Json<Vec<Translation>>, ApiError> {
    let rows: Vec<Translation> =
        sqlx::query_as("SELECT * FROM translations ORDER BY key ASC, language ASC")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(rows))
}

/// One language's translations as a flat key/value map. An unsupported
/// language code is a 400, not an empty map.
///
/// GET /api/translations/:language
pub async fn get_translations_for_language(
    State(state): State<Arc<AppState>>,
    Path(language): Path<String>,
) -> Result<Json<HashMap<String, String>>, ApiError> {
    let language: Language = language
        .parse()
        .map_err(|e: String| ApiError::validation_field("language", e))?;

    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT key, value FROM translations WHERE language = ?")
            .bind(language.as_str())
            .fetch_all(&state.db)
            .await?;

    Ok(Json(rows.into_iter().collect()))
}

/// Create or overwrite a translation (admin only). Repeating a
/// (key, language) pair replaces the stored value rather than erroring.
///
/// POST /api/translations
pub async fn upsert_translation(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Json(req): Json<UpsertTranslationRequest>,
) -> Result<(StatusCode, Json<Translation>), ApiError> {
    validate_upsert_request(&req)?;

    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO translations (id, key, language, value, category, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(key, language) DO UPDATE SET
            value = excluded.value,
            category = excluded.category,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(&id)
    .bind(&req.key)
    .bind(req.language.as_str())
    .bind(&req.value)
    .bind(&req.category)
    .bind(&now)
    .bind(&now)
    .execute(&state.db)
    .await?;

    let row: Translation =
        sqlx::query_as("SELECT * FROM translations WHERE key = ? AND language = ?")
            .bind(&req.key)
            .bind(req.language.as_str())
            .fetch_one(&state.db)
            .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// Update a translation's value or category by id (admin only).
///
/// PUT /api/translations/:id
pub async fn update_translation(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Path(id): Path<String>,
    Json(req): Json<UpdateTranslationRequest>,
) -> Result<Json<Translation>, ApiError> {
    if let Some(ref value) = req.value {
        if let Err(e) = validate_required(value, "Value") {
            return Err(ApiError::validation_field("value", e));
        }
    }

    let _existing: Translation = sqlx::query_as("SELECT * FROM translations WHERE id = ?")
        .bind(&id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Translation not found"))?;

    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        UPDATE translations SET
            value = COALESCE(?, value),
            category = COALESCE(?, category),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&req.value)
    .bind(&req.category)
    .bind(&now)
    .bind(&id)
    .execute(&state.db)
    .await?;

    let row: Translation = sqlx::query_as("SELECT * FROM translations WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(row))
}

/// Delete a translation by id (admin only).
///
/// DELETE /api/translations/:id
pub async fn delete_translation(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = sqlx::query("DELETE FROM translations WHERE id = ?")
        .bind(&id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Translation not found"));
    }

    Ok(Json(serde_json::json!({ "message": "Translation deleted" })))
}
