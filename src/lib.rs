//! Backend for a nonprofit history-preservation site: events listing,
//! contact form, and donation form over a swappable storage layer.

use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};

pub mod db;
pub mod routes;
pub mod storage;

use storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

/// Assembles the API router. Transport-level layers (CORS, tracing,
/// static files) are added by the binary.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/events",
            get(routes::events::list_events).post(routes::events::create_event),
        )
        .route("/api/events/{id}", get(routes::events::get_event))
        .route(
            "/api/contact",
            get(routes::contact::list_contact_submissions)
                .post(routes::contact::create_contact_submission),
        )
        .route(
            "/api/donations",
            get(routes::donations::list_donations).post(routes::donations::create_donation),
        )
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
