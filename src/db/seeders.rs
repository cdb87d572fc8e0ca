//! Startup seeding for the default admin account.

use anyhow::{anyhow, Result};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::api::auth::hash_password;
use crate::config::AuthConfig;

/// Create the configured admin account if its email is not present.
/// Runs on every startup; existing accounts are left untouched.
pub async fn ensure_default_admin(pool: &SqlitePool, auth: &AuthConfig) -> Result<()> {
    let email = auth.admin_email.trim().to_lowercase();

    let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM admins WHERE email = ?")
        .bind(&email)
        .fetch_optional(pool)
        .await?;

    if existing.is_some() {
        return Ok(());
    }

    if auth.admin_password.len() < auth.password_min_length {
        warn!(
            "Seed admin password is shorter than the configured minimum ({}); skipping seed",
            auth.password_min_length
        );
        return Ok(());
    }

    let password_hash = hash_password(&auth.admin_password)
        .map_err(|e| anyhow!("Failed to hash seed admin password: {}", e))?;

    let id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO admins (id, email, password_hash, name, role, is_active, created_at, updated_at)
        VALUES (?, ?, ?, ?, 'super_admin', 1, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&email)
    .bind(&password_hash)
    .bind(&auth.admin_name)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    info!("Created default admin account: {}", email);
    Ok(())
}
