//! Router configuration for the HTTP API.
//!
//! This module sets up all routes and middleware (CORS, request logging)
//! and creates the axum router ready for serving.

use axum::{
    middleware,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use super::logger;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        // Aircraft CRUD
        .route(
            "/aircraft",
            get(handlers::list_aircraft).post(handlers::create_aircraft),
        )
        .route(
            "/aircraft/{id}",
            get(handlers::get_aircraft)
                .put(handlers::update_aircraft)
                .delete(handlers::delete_aircraft),
        )
        // Task CRUD
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/tasks/{id}",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .layer(cors)
        // Outermost layer: every request gets its start/end log lines
        .layer(middleware::from_fn_with_state(
            state.clone(),
            logger::log_requests,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo =
            Arc::new(LocalRepository::new()) as Arc<dyn crate::db::repository::FullRepository>;
        let state = AppState::new(repo);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
