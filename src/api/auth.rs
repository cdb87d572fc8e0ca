//! Authentication: password hashing, bearer token issue/verify, the request
//! extractors gating admin routes, and the login/me/logout endpoints.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{request::Parts, HeaderMap},
    Json,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::db::{Admin, AdminResponse, LoginRequest, LoginResponse};
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::validate_email;

/// Hash a password using Argon2 with a random salt
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash. A mismatch is `false`, never an
/// error, so callers cannot distinguish it from an unknown account.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Bearer token claims: the admin id and an expiry.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: usize,
    exp: usize,
}

/// Issue a signed token for an admin id, expiring after the configured TTL.
pub fn issue_token(admin_id: &str, auth: &AuthConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: admin_id.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + chrono::Duration::days(auth.token_ttl_days)).timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.jwt_secret.as_bytes()),
    )
}

/// Verify a token's signature and expiry, returning the embedded admin id.
pub fn verify_token(token: &str, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims.sub)
}

/// Pull the token out of an `Authorization: Bearer ...` header
fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

async fn resolve_admin(headers: &HeaderMap, state: &AppState) -> Result<Admin, ApiError> {
    let token =
        extract_bearer(headers).ok_or_else(|| ApiError::unauthorized("Access token required"))?;

    let admin_id = verify_token(&token, &state.config.auth.jwt_secret)
        .map_err(|_| ApiError::forbidden("Invalid or expired token"))?;

    let admin: Option<Admin> = sqlx::query_as("SELECT * FROM admins WHERE id = ?")
        .bind(&admin_id)
        .fetch_optional(&state.db)
        .await?;

    // A valid token for a deleted account is not a token problem
    match admin {
        Some(a) if a.is_active != 0 => Ok(a),
        Some(_) => Err(ApiError::forbidden("Invalid or expired token")),
        None => Err(ApiError::not_found("Admin not found")),
    }
}

/// Mandatory auth gate: handlers taking an `Admin` argument reject requests
/// without a valid token before the handler body runs.
#[async_trait]
impl FromRequestParts<Arc<AppState>> for Admin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        resolve_admin(&parts.headers, state).await
    }
}

/// Advisory auth: attaches the admin identity when a valid token is present,
/// proceeds anonymously otherwise. Used by the public list endpoints so an
/// authenticated admin also sees unpublished entries.
pub struct MaybeAdmin(pub Option<Admin>);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for MaybeAdmin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAdmin(resolve_admin(&parts.headers, state).await.ok()))
    }
}

/// Login endpoint
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    // Malformed requests are 400s, distinct from wrong credentials
    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_email(req.email.trim()) {
        errors.add("email", e);
    }
    if req.password.len() < state.config.auth.password_min_length {
        errors.add(
            "password",
            format!(
                "Password must be at least {} characters",
                state.config.auth.password_min_length
            ),
        );
    }
    errors.finish()?;

    let email = req.email.trim().to_lowercase();

    let admin: Option<Admin> = sqlx::query_as("SELECT * FROM admins WHERE email = ?")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;

    // Unknown account, deactivated account and wrong password all get the
    // same response, so callers cannot enumerate emails.
    let mut admin = match admin {
        Some(a) if a.is_active != 0 => a,
        _ => return Err(ApiError::unauthorized("Invalid email or password")),
    };

    if !verify_password(&req.password, &admin.password_hash) {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let now = Utc::now().to_rfc3339();
    sqlx::query("UPDATE admins SET last_login = ?, updated_at = ? WHERE id = ?")
        .bind(&now)
        .bind(&now)
        .bind(&admin.id)
        .execute(&state.db)
        .await?;
    admin.last_login = Some(now);

    let token = issue_token(&admin.id, &state.config.auth).map_err(|e| {
        tracing::error!("Failed to issue token: {}", e);
        ApiError::internal("Failed to issue token")
    })?;

    tracing::info!(email = %admin.email, "Admin logged in");

    Ok(Json(LoginResponse {
        token,
        admin: AdminResponse::from(admin),
    }))
}

/// Current admin endpoint
///
/// GET /api/auth/me
pub async fn me(admin: Admin) -> Json<AdminResponse> {
    Json(AdminResponse::from(admin))
}

/// Logout endpoint. Tokens are not tracked server-side; the client discards
/// its copy and the token lapses at its TTL.
///
/// POST /api/auth/logout
pub async fn logout(_admin: Admin) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Logged out successfully" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::test_pool;

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn test_password_hash_is_salted() {
        let a = hash_password("same input").unwrap();
        let b = hash_password("same input").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same input", &a));
        assert!(verify_password("same input", &b));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_token_round_trip() {
        let auth = AuthConfig::default();
        let token = issue_token("admin-123", &auth).unwrap();
        let id = verify_token(&token, &auth.jwt_secret).unwrap();
        assert_eq!(id, "admin-123");
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let auth = AuthConfig::default();
        let token = issue_token("admin-123", &auth).unwrap();
        assert!(verify_token(&token, "some-other-secret").is_err());
    }

    #[test]
    fn test_expired_token_fails_despite_valid_signature() {
        let auth = AuthConfig::default();
        let claims = Claims {
            sub: "admin-123".to_string(),
            iat: (Utc::now() - chrono::Duration::days(8)).timestamp() as usize,
            exp: (Utc::now() - chrono::Duration::days(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(auth.jwt_secret.as_bytes()),
        )
        .unwrap();
        assert!(verify_token(&token, &auth.jwt_secret).is_err());
    }

    async fn state_with_admin(password: &str, active: bool) -> Arc<AppState> {
        let pool = test_pool().await;
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO admins (id, email, password_hash, name, role, is_active, created_at, updated_at)
             VALUES ('a1', 'manager@example.com', ?, 'Manager', 'admin', ?, ?, ?)",
        )
        .bind(hash_password(password).unwrap())
        .bind(active as i64)
        .bind(&now)
        .bind(&now)
        .execute(&pool)
        .await
        .unwrap();

        Arc::new(AppState::new(Config::default(), pool))
    }

    #[tokio::test]
    async fn test_login_success_returns_verifiable_token() {
        let state = state_with_admin("guest-house-1", true).await;

        let Json(resp) = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "Manager@Example.com ".trim().to_string(),
                password: "guest-house-1".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(resp.admin.email, "manager@example.com");
        assert!(resp.admin.last_login.is_some());
        let id = verify_token(&resp.token, &state.config.auth.jwt_secret).unwrap();
        assert_eq!(id, "a1");

        // The serialized admin view never carries password material
        let json = serde_json::to_value(&resp.admin).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_generic_401() {
        let state = state_with_admin("guest-house-1", true).await;

        let err = login(
            State(state),
            Json(LoginRequest {
                email: "manager@example.com".to_string(),
                password: "wrong-password".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status().as_u16(), 401);
        assert_eq!(err.message(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_login_inactive_admin_is_generic_401() {
        let state = state_with_admin("guest-house-1", false).await;

        let err = login(
            State(state),
            Json(LoginRequest {
                email: "manager@example.com".to_string(),
                password: "guest-house-1".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status().as_u16(), 401);
        assert_eq!(err.message(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_login_malformed_request_is_400() {
        let state = state_with_admin("guest-house-1", true).await;

        let err = login(
            State(state),
            Json(LoginRequest {
                email: "not-an-email".to_string(),
                password: "short".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status().as_u16(), 400);
        assert_eq!(err.field_errors().len(), 2);
    }
}
