//! Content management backend for a trilingual hotels-and-tours website.
//!
//! Serves a JSON API for hotels, tours, static pages, a photo gallery, UI
//! translations and contact form submissions, with admin authentication in
//! front of every write.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod notifications;

use std::sync::Arc;

use config::Config;
use db::DbPool;
use notifications::ContactNotifier;

/// Shared application state handed to every request handler.
pub struct AppState {
    pub config: Config,
    pub db: DbPool,
    pub notifier: Arc<ContactNotifier>,
}

impl AppState {
    pub fn new(config: Config, db: DbPool) -> Self {
        let notifier = Arc::new(ContactNotifier::new(config.smtp.clone()));
        Self {
            config,
            db,
            notifier,
        }
    }
}
