use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::{handlers, state::ApiState};

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))

        // Todo endpoints (the contract the task repository consumes)
        .route("/api/todoapi", get(handlers::todo::list_todos))
        .route("/api/todoapi", post(handlers::todo::create_todo))
        .route("/api/todoapi/:id", get(handlers::todo::get_todo))
        .route("/api/todoapi/:id", put(handlers::todo::update_todo))
        .route("/api/todoapi/:id", delete(handlers::todo::delete_todo))
        .route("/api/todoapi/:id/toggle", patch(handlers::todo::toggle_todo))

        // Add state
        .with_state(state)

        // Add CORS
        .layer(CorsLayer::permissive())
}
