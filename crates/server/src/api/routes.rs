use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, middleware::metrics_middleware, strings};
use crate::metrics::metrics_handler;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Strings
        .route("/strings", post(strings::create_string))
        .route("/strings", get(strings::list_strings))
        // Literal segment takes precedence over the {value} capture
        .route(
            "/strings/filter-by-natural-language",
            get(strings::natural_language_filter),
        )
        .route("/strings/{value}", get(strings::get_string_by_value))
        .route("/strings/{value}", delete(strings::delete_string))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
