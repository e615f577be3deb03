/// Application routes configuration
use crate::handlers::{get_launch, health, index, search_launches, AppState};
use axum::{routing::get, Router};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(index))
        // Health check
        .route("/health", get(health))
        // JSON endpoints
        .route("/api/launches", get(search_launches))
        .route("/api/launches/:id", get(get_launch))
        .with_state(state)
}
