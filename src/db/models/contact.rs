//! Contact message models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactMessage {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub is_read: i64,
    pub is_responded: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessageResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub is_responded: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ContactMessage> for ContactMessageResponse {
    fn from(msg: ContactMessage) -> Self {
        Self {
            id: msg.id,
            first_name: msg.first_name,
            last_name: msg.last_name,
            email: msg.email,
            phone: msg.phone,
            subject: msg.subject,
            message: msg.message,
            is_read: msg.is_read != 0,
            is_responded: msg.is_responded != 0,
            created_at: msg.created_at,
            updated_at: msg.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

/// Response for the public submission endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitContactResponse {
    pub message: String,
    pub data: ContactMessageResponse,
}
