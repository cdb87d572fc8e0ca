//! Contact form endpoints.
//!
//! Submission is public. The stored record is the source of truth; the email
//! notification is fired on a background task and its failure never affects
//! the HTTP response.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{
    Admin, ContactMessage, ContactMessageResponse, SubmitContactRequest, SubmitContactResponse,
};
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{
    validate_email, validate_message_body, validate_phone, validate_required,
};

fn validate_submit_request(req: &SubmitContactRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_required(&req.first_name, "First name") {
        errors.add("first_name", e);
    }
    if let Err(e) = validate_required(&req.last_name, "Last name") {
        errors.add("last_name", e);
    }
    if let Err(e) = validate_email(req.email.trim()) {
        errors.add("email", e);
    }
    if let Err(e) = validate_phone(&req.phone) {
        errors.add("phone", e);
    }
    if let Err(e) = validate_required(&req.subject, "Subject") {
        errors.add("subject", e);
    }
    if let Err(e) = validate_message_body(&req.message) {
        errors.add("message", e);
    }

    errors.finish()
}

/// Public contact form submission
///
/// POST /api/contact
pub async fn submit_contact_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitContactRequest>,
) -> Result<(StatusCode, Json<SubmitContactResponse>), ApiError> {
    validate_submit_request(&req)?;

    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO contact_messages (
            id, first_name, last_name, email, phone, subject, message,
            is_read, is_responded, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, 0, 0, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(req.first_name.trim())
    .bind(req.last_name.trim())
    .bind(req.email.trim())
    .bind(&req.phone)
    .bind(req.subject.trim())
    .bind(&req.message)
    .bind(&now)
    .bind(&now)
    .execute(&state.db)
    .await?;

    let record: ContactMessage = sqlx::query_as("SELECT * FROM contact_messages WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    // Notify out of band; the submission already succeeded
    let notifier = state.notifier.clone();
    let for_email = record.clone();
    tokio::spawn(async move {
        if let Err(e) = notifier.notify(&for_email).await {
            tracing::warn!("Failed to send contact notification email: {}", e);
        }
    });

    Ok((
        StatusCode::CREATED,
        Json(SubmitContactResponse {
            message: "Thank you for your message. We will get back to you soon.".to_string(),
            data: record.into(),
        }),
    ))
}

/// List contact messages, newest first (admin only)
///
/// GET /api/contact
pub async fn list_contact_messages(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
) -> Result<Json<Vec<ContactMessageResponse>>, ApiError> {
    let messages: Vec<ContactMessage> =
        sqlx::query_as("SELECT * FROM contact_messages ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(
        messages.into_iter().map(ContactMessageResponse::from).collect(),
    ))
}

/// Mark a message as read (admin only). Already-read messages stay read.
///
/// PATCH /api/contact/:id/read
pub async fn mark_contact_message_read(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Path(id): Path<String>,
) -> Result<Json<ContactMessageResponse>, ApiError> {
    let now = chrono::Utc::now().to_rfc3339();

    let result = sqlx::query("UPDATE contact_messages SET is_read = 1, updated_at = ? WHERE id = ?")
        .bind(&now)
        .bind(&id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Contact message not found"));
    }

    let message: ContactMessage = sqlx::query_as("SELECT * FROM contact_messages WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(message.into()))
}

/// Delete a contact message (admin only). Hard delete.
///
/// DELETE /api/contact/:id
pub async fn delete_contact_message(
    State(state): State<Arc<AppState>>,
    _admin: Admin,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = sqlx::query("DELETE FROM contact_messages WHERE id = ?")
        .bind(&id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Contact message not found"));
    }

    Ok(Json(serde_json::json!({ "message": "Contact message deleted" })))
}
