pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::favorites;
use crate::reviews;
use crate::search;
use crate::state::AppState;
use crate::suggest;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Search API
        .route("/api/v1/search", post(search::handle_search))
        .route("/api/v1/reviews/summary", post(reviews::handle_review_summary))
        .route("/api/v1/suggest", get(suggest::handle_suggest))
        // Account API
        .route(
            "/api/v1/favorites",
            post(favorites::handle_create_favorite).get(favorites::handle_list_favorites),
        )
        .route(
            "/api/v1/favorites/:id",
            delete(favorites::handle_delete_favorite),
        )
        .route("/api/v1/history", get(favorites::handle_list_history))
        .route(
            "/api/v1/history/:id",
            delete(favorites::handle_delete_history),
        )
        .with_state(state)
}
