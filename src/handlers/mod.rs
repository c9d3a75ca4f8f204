pub mod bookings;
pub mod chat;
pub mod health;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/chat", post(chat::chat))
        .route("/book", post(bookings::book))
        .route("/list", post(bookings::list))
        .route("/cancel", post(bookings::cancel))
        .route("/slots", post(bookings::slots))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
