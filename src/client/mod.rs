//! Typed HTTP client for the API, used by admin tooling and scripts.
//!
//! The client holds an explicit [`Session`] after login. Any auth rejection
//! from the server drops the session, so a caller holding an expired token
//! fails fast with [`ClientError::SessionExpired`] instead of retrying
//! blindly.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use crate::api::error::{ErrorResponse, ValidationResponse};
use crate::db::{
    AdminResponse, ContactMessageResponse, CreateGalleryImageRequest, CreateHotelRequest,
    CreatePageRequest, CreateTourRequest, GalleryCategory, GalleryImageResponse, HotelResponse,
    Language, LoginRequest, LoginResponse, PageResponse, SubmitContactRequest,
    SubmitContactResponse, TourResponse, Translation, UpdateGalleryImageRequest,
    UpdateHotelRequest, UpdatePageRequest, UpdateTourRequest, UpdateTranslationRequest,
    UpsertTranslationRequest,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the stored token. The session has been cleared;
    /// log in again.
    #[error("session expired, log in again")]
    SessionExpired,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// An authenticated session: the bearer token and the admin it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub admin: AdminResponse,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    /// Create a client against a base URL such as `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: None,
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Attach an existing session, e.g. a token restored from disk.
    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    async fn request<B: Serialize + ?Sized, T: DeserializeOwned>(
        &mut self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let url = format!("{}/api{}", self.base_url, path);
        let mut builder = self.http.request(method, &url);

        if let Some(session) = &self.session {
            builder = builder.bearer_auth(&session.token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();

        // A rejected token invalidates the whole session. The server answers
        // 401 for a missing token and 403 for a bad one; with a session
        // attached, either means the token no longer works.
        if matches!(status.as_u16(), 401 | 403) && self.session.is_some() {
            self.session = None;
            return Err(ClientError::SessionExpired);
        }

        Err(ClientError::Api {
            status: status.as_u16(),
            message: parse_error_message(&text),
        })
    }

    async fn get<T: DeserializeOwned>(&mut self, path: &str) -> Result<T, ClientError> {
        self.request::<(), T>(Method::GET, path, None).await
    }

    async fn delete<T: DeserializeOwned>(&mut self, path: &str) -> Result<T, ClientError> {
        self.request::<(), T>(Method::DELETE, path, None).await
    }

    // Auth

    /// Log in and store the session for subsequent calls. Any session held
    /// before the attempt is discarded, so a failed login surfaces the
    /// server's error rather than a session-expiry.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&Session, ClientError> {
        self.session = None;

        let resp: LoginResponse = self
            .request(
                Method::POST,
                "/auth/login",
                Some(&LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                }),
            )
            .await?;

        Ok(self.session.insert(Session {
            token: resp.token,
            admin: resp.admin,
        }))
    }

    /// Log out server-side and drop the session either way.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        let result = self
            .request::<(), serde_json::Value>(Method::POST, "/auth/logout", None)
            .await;
        self.session = None;
        result.map(|_| ())
    }

    pub async fn me(&mut self) -> Result<AdminResponse, ClientError> {
        self.get("/auth/me").await
    }

    // Hotels

    pub async fn list_hotels(&mut self) -> Result<Vec<HotelResponse>, ClientError> {
        self.get("/hotels").await
    }

    pub async fn get_hotel(&mut self, slug: &str) -> Result<HotelResponse, ClientError> {
        self.get(&format!("/hotels/{}", slug)).await
    }

    pub async fn create_hotel(
        &mut self,
        req: &CreateHotelRequest,
    ) -> Result<HotelResponse, ClientError> {
        self.request(Method::POST, "/hotels", Some(req)).await
    }

    pub async fn update_hotel(
        &mut self,
        id: &str,
        req: &UpdateHotelRequest,
    ) -> Result<HotelResponse, ClientError> {
        self.request(Method::PUT, &format!("/hotels/{}", id), Some(req))
            .await
    }

    pub async fn delete_hotel(&mut self, id: &str) -> Result<(), ClientError> {
        self.delete::<serde_json::Value>(&format!("/hotels/{}", id))
            .await
            .map(|_| ())
    }

    // Tours

    pub async fn list_tours(&mut self) -> Result<Vec<TourResponse>, ClientError> {
        self.get("/tours").await
    }

    pub async fn get_tour(&mut self, slug: &str) -> Result<TourResponse, ClientError> {
        self.get(&format!("/tours/{}", slug)).await
    }

    pub async fn create_tour(
        &mut self,
        req: &CreateTourRequest,
    ) -> Result<TourResponse, ClientError> {
        self.request(Method::POST, "/tours", Some(req)).await
    }

    pub async fn update_tour(
        &mut self,
        id: &str,
        req: &UpdateTourRequest,
    ) -> Result<TourResponse, ClientError> {
        self.request(Method::PUT, &format!("/tours/{}", id), Some(req))
            .await
    }

    pub async fn delete_tour(&mut self, id: &str) -> Result<(), ClientError> {
        self.delete::<serde_json::Value>(&format!("/tours/{}", id))
            .await
            .map(|_| ())
    }

    // Pages

    pub async fn list_pages(&mut self) -> Result<Vec<PageResponse>, ClientError> {
        self.get("/pages").await
    }

    pub async fn get_page(&mut self, slug: &str) -> Result<PageResponse, ClientError> {
        self.get(&format!("/pages/{}", slug)).await
    }

    pub async fn create_page(
        &mut self,
        req: &CreatePageRequest,
    ) -> Result<PageResponse, ClientError> {
        self.request(Method::POST, "/pages", Some(req)).await
    }

    pub async fn update_page(
        &mut self,
        id: &str,
        req: &UpdatePageRequest,
    ) -> Result<PageResponse, ClientError> {
        self.request(Method::PUT, &format!("/pages/{}", id), Some(req))
            .await
    }

    pub async fn delete_page(&mut self, id: &str) -> Result<(), ClientError> {
        self.delete::<serde_json::Value>(&format!("/pages/{}", id))
            .await
            .map(|_| ())
    }

    // Gallery

    pub async fn list_gallery_images(
        &mut self,
        category: Option<GalleryCategory>,
    ) -> Result<Vec<GalleryImageResponse>, ClientError> {
        let path = match category {
            Some(c) => format!("/gallery?category={}", c.as_str()),
            None => "/gallery".to_string(),
        };
        self.get(&path).await
    }

    pub async fn create_gallery_image(
        &mut self,
        req: &CreateGalleryImageRequest,
    ) -> Result<GalleryImageResponse, ClientError> {
        self.request(Method::POST, "/gallery", Some(req)).await
    }

    pub async fn update_gallery_image(
        &mut self,
        id: &str,
        req: &UpdateGalleryImageRequest,
    ) -> Result<GalleryImageResponse, ClientError> {
        self.request(Method::PUT, &format!("/gallery/{}", id), Some(req))
            .await
    }

    pub async fn delete_gallery_image(&mut self, id: &str) -> Result<(), ClientError> {
        self.delete::<serde_json::Value>(&format!("/gallery/{}", id))
            .await
            .map(|_| ())
    }

    // Translations

    /// One language's translations as a flat key/value map.
    pub async fn get_translations(
        &mut self,
        language: Language,
    ) -> Result<HashMap<String, String>, ClientError> {
        self.get(&format!("/translations/{}", language.as_str()))
            .await
    }

    pub async fn list_translations(&mut self) -> Result<Vec<Translation>, ClientError> {
        self.get("/translations").await
    }

    pub async fn upsert_translation(
        &mut self,
        req: &UpsertTranslationRequest,
    ) -> Result<Translation, ClientError> {
        self.request(Method::POST, "/translations", Some(req)).await
    }

    pub async fn update_translation(
        &mut self,
        id: &str,
        req: &UpdateTranslationRequest,
    ) -> Result<Translation, ClientError> {
        self.request(Method::PUT, &format!("/translations/{}", id), Some(req))
            .await
    }

    pub async fn delete_translation(&mut self, id: &str) -> Result<(), ClientError> {
        self.delete::<serde_json::Value>(&format!("/translations/{}", id))
            .await
            .map(|_| ())
    }

    // Contact

    pub async fn submit_contact_message(
        &mut self,
        req: &SubmitContactRequest,
    ) -> Result<SubmitContactResponse, ClientError> {
        self.request(Method::POST, "/contact", Some(req)).await
    }

    pub async fn list_contact_messages(
        &mut self,
    ) -> Result<Vec<ContactMessageResponse>, ClientError> {
        self.get("/contact").await
    }

    pub async fn mark_contact_message_read(
        &mut self,
        id: &str,
    ) -> Result<ContactMessageResponse, ClientError> {
        self.request::<(), _>(Method::PATCH, &format!("/contact/{}/read", id), None)
            .await
    }

    pub async fn delete_contact_message(&mut self, id: &str) -> Result<(), ClientError> {
        self.delete::<serde_json::Value>(&format!("/contact/{}", id))
            .await
            .map(|_| ())
    }
}

/// Extract a human-readable message from an error response body. Both the
/// generic and the validation envelope are understood; anything else falls
/// back to a fixed message.
fn parse_error_message(body: &str) -> String {
    if let Ok(resp) = serde_json::from_str::<ErrorResponse>(body) {
        return resp.error.message;
    }
    if let Ok(resp) = serde_json::from_str::<ValidationResponse>(body) {
        let messages: Vec<String> = resp
            .errors
            .into_iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        if !messages.is_empty() {
            return messages.join("; ");
        }
    }
    "Request failed".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generic_envelope() {
        let body = r#"{"error":{"status":404,"message":"Hotel not found"}}"#;
        assert_eq!(parse_error_message(body), "Hotel not found");
    }

    #[test]
    fn test_parse_validation_envelope() {
        let body = r#"{"errors":[
            {"field":"slug","message":"Slug is required"},
            {"field":"message","message":"Message must be at least 10 characters"}
        ]}"#;
        assert_eq!(
            parse_error_message(body),
            "slug: Slug is required; message: Message must be at least 10 characters"
        );
    }

    #[test]
    fn test_parse_unknown_body_falls_back() {
        assert_eq!(parse_error_message("<html>bad gateway</html>"), "Request failed");
        assert_eq!(parse_error_message(""), "Request failed");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url, "http://localhost:5000");
    }

    #[test]
    fn test_new_client_has_no_session() {
        let client = ApiClient::new("http://localhost:5000").unwrap();
        assert!(client.session.is_none());
    }

    use crate::config::Config;
    use std::sync::Arc;

    async fn spawn_server() -> (ApiClient, Arc<crate::AppState>) {
        let state = Arc::new(crate::AppState::new(
            Config::default(),
            crate::db::test_pool().await,
        ));
        let app = crate::api::router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = ApiClient::new(format!("http://{}", addr)).unwrap();
        (client, state)
    }

    async fn insert_admin(state: &crate::AppState, password: &str) {
        let hash = crate::api::auth::hash_password(password).unwrap();
        let now = chrono::Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO admins (id, email, password_hash, name, role, is_active, created_at, updated_at)
             VALUES ('a1', 'manager@example.com', ?, 'Manager', 'admin', 1, ?, ?)",
        )
        .bind(&hash)
        .bind(&now)
        .bind(&now)
        .execute(&state.db)
        .await
        .unwrap();
    }

    fn stale_session() -> Session {
        Session {
            token: "not-a-real-token".to_string(),
            admin: AdminResponse {
                id: "a1".to_string(),
                email: "manager@example.com".to_string(),
                name: "Manager".to_string(),
                role: "admin".to_string(),
                last_login: None,
            },
        }
    }

    #[tokio::test]
    async fn test_login_me_logout_round_trip() {
        let (mut client, state) = spawn_server().await;
        insert_admin(&state, "guest-house-1").await;

        let email = client
            .login("manager@example.com", "guest-house-1")
            .await
            .unwrap()
            .admin
            .email
            .clone();
        assert_eq!(email, "manager@example.com");

        // The stored token rides along on subsequent calls
        let me = client.me().await.unwrap();
        assert_eq!(me.email, "manager@example.com");

        client.logout().await.unwrap();
        assert!(client.session().is_none());
    }

    #[tokio::test]
    async fn test_rejected_token_clears_session() {
        let (mut client, state) = spawn_server().await;
        insert_admin(&state, "guest-house-1").await;

        client.set_session(stale_session());
        let err = client.me().await.unwrap_err();
        assert!(matches!(err, ClientError::SessionExpired));
        assert!(client.session().is_none());

        // Fresh login recovers from the expired session
        client
            .login("manager@example.com", "guest-house-1")
            .await
            .unwrap();
        assert!(client.me().await.is_ok());
    }

    #[tokio::test]
    async fn test_login_failure_is_not_session_expiry() {
        let (mut client, state) = spawn_server().await;
        insert_admin(&state, "guest-house-1").await;

        let err = client
            .login("manager@example.com", "wrong-password")
            .await
            .unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid email or password");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(client.session().is_none());
    }

    #[tokio::test]
    async fn test_anonymous_401_is_api_error() {
        let (mut client, _state) = spawn_server().await;

        // No session held, so a 401 stays an ordinary API error
        let err = client.list_contact_messages().await.unwrap_err();
        match err {
            ClientError::Api { status, .. } => assert_eq!(status, 401),
            other => panic!("unexpected error: {other}"),
        }
    }
}
