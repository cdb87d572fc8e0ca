//! Static page CRUD endpoints. Pages carry localized title/body blocks for
//! site chrome like "about" or "visit-lalibela".

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{
    serialize_contents, Admin, CreatePageRequest, Page, PageResponse, UpdatePageRequest,
};
use crate::AppState;

use super::auth::MaybeAdmin;
use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{validate_required, validate_slug};

fn validate_create_request(req: &CreatePageRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_slug(&req.slug) {
        errors.add("slug", e);
    }
    if let Err(e) = validate_required(&req.title, "Title") {
        errors.add("title", e);
    }
    if req.contents.is_empty() {
        errors.add("contents", "At least one language content block is required");
    }

    errors.finish()
}

fn validate_update_request(req: &UpdatePageRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Some(ref slug) = req.slug {
        if let Err(e) = validate_slug(slug) {
            errors.add("slug", e);
        }
    }
    if let Some(ref title) = req.title {
        if let Err(e) = validate_required(title, "Title") {
            errors.add("title", e);
        }
    }
    if let Some(ref contents) = req.contents {
        if contents.is_empty() {
            errors.add("contents", "At least one language content block is required");
        }
    }

    errors.finish()
}

/// List pages; unpublished pages appear only for authenticated admins.
///
/// GET /api/pages
pub async fn list_pages(
    State(state): State<Arc<AppState>>,
    MaybeAdmin(admin): MaybeAdmin,
) -> Result<Json<Vec<PageResponse>>, ApiError> {
    let pages: Vec<Page> = if admin.is_some() {
        sqlx::query_as("SELECT * FROM pages ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?
    } else {
        sqlx::query_as("SELECT * FROM pages WHERE is_published = 1 ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?
    };

    Ok(Json(pages.iter().map(Page::to_response).collect()))
}

/// Get one published page by slug
///
/// GET /api/pages/:slug
pub async fn get_page_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<PageResponse>, ApiError> {
    let page: Option<Page> =
        sqlx::query_as("SELECT * FROM pages WHERE slug = ? AND is_published = 1")
            .bind(&slug)
            .fetch_optional(&state.db)
            .await?;

    match page {
        Some(p) => Ok(Json(p.to_response())),
        None => Err(ApiError::not_found("Page not found")),
    }
}

/// Create a page (admin only)
///
/// POST /api/pages
pub async fn create_page(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Json(req): Json<CreatePageRequest>,
) -> Result<(StatusCode, Json<PageResponse>), ApiError> {
    validate_create_request(&req)?;

    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO pages (
            id, slug, title, contents, seo_title, seo_description, is_published,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.slug)
    .bind(&req.title)
    .bind(serialize_contents(&req.contents))
    .bind(&req.seo_title)
    .bind(&req.seo_description)
    .bind(req.is_published as i64)
    .bind(&now)
    .bind(&now)
    .execute(&state.db)
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            ApiError::conflict("A page with this slug already exists")
        } else {
            tracing::error!("Failed to create page: {}", e);
            ApiError::database("Failed to create page")
        }
    })?;

    let page: Page = sqlx::query_as("SELECT * FROM pages WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    Ok((StatusCode::CREATED, Json(page.to_response())))
}

/// Update a page (admin only). Absent fields keep their stored values.
///
/// PUT /api/pages/:id
pub async fn update_page(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Path(id): Path<String>,
    Json(req): Json<UpdatePageRequest>,
) -> Result<Json<PageResponse>, ApiError> {
    validate_update_request(&req)?;

    let _existing: Page = sqlx::query_as("SELECT * FROM pages WHERE id = ?")
        .bind(&id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Page not found"))?;

    let now = chrono::Utc::now().to_rfc3339();
    let contents = req.contents.as_ref().map(serialize_contents);

    sqlx::query(
        r#"
        UPDATE pages SET
            slug = COALESCE(?, slug),
            title = COALESCE(?, title),
            contents = COALESCE(?, contents),
            seo_title = COALESCE(?, seo_title),
            seo_description = COALESCE(?, seo_description),
            is_published = COALESCE(?, is_published),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&req.slug)
    .bind(&req.title)
    .bind(&contents)
    .bind(&req.seo_title)
    .bind(&req.seo_description)
    .bind(req.is_published.map(|p| p as i64))
    .bind(&now)
    .bind(&id)
    .execute(&state.db)
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            ApiError::conflict("A page with this slug already exists")
        } else {
            tracing::error!("Failed to update page: {}", e);
            ApiError::database("Failed to update page")
        }
    })?;

    let page: Page = sqlx::query_as("SELECT * FROM pages WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(page.to_response()))
}

/// Delete a page (admin only). Hard delete.
///
/// DELETE /api/pages/:id
pub async fn delete_page(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = sqlx::query("DELETE FROM pages WHERE id = ?")
        .bind(&id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Page not found"));
    }

    Ok(Json(serde_json::json!({ "message": "Page deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::{test_pool, Language, PageContent};
    use std::collections::HashMap;

    fn sample_contents() -> HashMap<Language, PageContent> {
        let mut contents = HashMap::new();
        contents.insert(
            Language::En,
            PageContent {
                title: "About Us".to_string(),
                content: "We have hosted travellers since 2004.".to_string(),
            },
        );
        contents.insert(
            Language::Am,
            PageContent {
                title: "ስለ እኛ".to_string(),
                content: "ከ2004 ጀምሮ እንግዶችን እናስተናግዳለን።".to_string(),
            },
        );
        contents
    }

    fn sample_create(slug: &str, published: bool) -> CreatePageRequest {
        CreatePageRequest {
            slug: slug.to_string(),
            title: "About Us".to_string(),
            contents: sample_contents(),
            seo_title: Some("About".to_string()),
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
    fn test_create_validation() {
        let mut req = sample_create("About Us", true);
        req.title = "  ".to_string();
        req.contents.clear();

        let err = validate_create_request(&req).unwrap_err();
        assert_eq!(err.status().as_u16(), 400);
        assert_eq!(err.field_errors().len(), 3);
    }

    #[tokio::test]
    async fn test_multilingual_contents_survive_round_trip() {
        let state = test_state().await;
        let admin = insert_admin(&state).await;

        create_page(State(state.clone()), admin, Json(sample_create("about", true)))
            .await
            .unwrap();

        let Json(page) = get_page_by_slug(State(state), Path("about".to_string()))
            .await
            .unwrap();
        assert_eq!(page.contents.len(), 2);
        assert_eq!(page.contents.get(&Language::Am).unwrap().title, "ስለ እኛ");
    }

    #[tokio::test]
    async fn test_unpublish_via_update_hides_page() {
        let state = test_state().await;
        let admin = insert_admin(&state).await;

        let (_, Json(created)) = create_page(
            State(state.clone()),
            admin.clone(),
            Json(sample_create("about", true)),
        )
        .await
        .unwrap();

        update_page(
            State(state.clone()),
            admin,
            Path(created.id),
            Json(UpdatePageRequest {
                is_published: Some(false),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        let err = get_page_by_slug(State(state), Path("about".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status().as_u16(), 404);
    }
}
