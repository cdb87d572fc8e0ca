//! Admin account models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Admin {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub is_active: i64,
    pub last_login: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Admin view returned by the API; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub last_login: Option<String>,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            name: admin.name,
            role: admin.role,
            last_login: admin.last_login,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminResponse,
}
