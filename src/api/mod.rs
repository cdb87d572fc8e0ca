//! HTTP API: routing, auth, validation and the endpoint handlers.

pub mod auth;
pub mod contact;
pub mod error;
pub mod gallery;
pub mod hotels;
pub mod pages;
pub mod tours;
pub mod translations;
pub mod validation;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::CorsConfig;
use crate::AppState;

/// Health check endpoint
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Build the application router. All endpoints live under `/api`.
///
/// Paths that mix public reads (by slug) and admin writes (by id) share one
/// route entry, since the router requires a single parameter name per
/// position.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors);

    let api = Router::new()
        .route("/health", get(health))
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/auth/logout", post(auth::logout))
        // Hotels
        .route("/hotels", get(hotels::list_hotels).post(hotels::create_hotel))
        .route(
            "/hotels/:slug",
            get(hotels::get_hotel_by_slug)
                .put(hotels::update_hotel)
                .delete(hotels::delete_hotel),
        )
        // Tours
        .route("/tours", get(tours::list_tours).post(tours::create_tour))
        .route(
            "/tours/:slug",
            get(tours::get_tour_by_slug)
                .put(tours::update_tour)
                .delete(tours::delete_tour),
        )
        // Pages
        .route("/pages", get(pages::list_pages).post(pages::create_page))
        .route(
            "/pages/:slug",
            get(pages::get_page_by_slug)
                .put(pages::update_page)
                .delete(pages::delete_page),
        )
        // Gallery
        .route(
            "/gallery",
            get(gallery::list_gallery_images).post(gallery::create_gallery_image),
        )
        .route(
            "/gallery/:id",
            axum::routing::put(gallery::update_gallery_image)
                .delete(gallery::delete_gallery_image),
        )
        // Translations
        .route(
            "/translations",
            get(translations::list_translations).post(translations::upsert_translation),
        )
        .route(
            "/translations/:language",
            get(translations::get_translations_for_language)
                .put(translations::update_translation)
                .delete(translations::delete_translation),
        )
        // Contact
        .route(
            "/contact",
            post(contact::submit_contact_message).get(contact::list_contact_messages),
        )
        .route(
            "/contact/:id",
            axum::routing::delete(contact::delete_contact_message),
        )
        .route(
            "/contact/:id/read",
            axum::routing::patch(contact::mark_contact_message_read),
        )
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
