use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer, Config};
use crate::handlers::{
    archive_event, create_event, delete_event, health_check, list_events, send_email,
    update_event,
};
use crate::state::AppState;

/// Event routes, relative to the mount point.
pub fn events_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/send-email",
            post(send_email).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/delete/:id", delete(delete_event))
        .route("/", post(create_event).get(list_events))
        .route("/:id", put(update_event))
        .route("/archive/:id", put(archive_event))
}

pub fn create_routes(state: AppState, config: &Config) -> Router {
    let events = events_router(state.uploads.max_bytes);
    let router = Router::new().route("/health", get(health_check));

    let router = if config.server.base_path.is_empty() {
        router.merge(events)
    } else {
        router.nest(&config.server.base_path, events)
    };

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer(config.production))
        .layer(create_cors_layer(&config.cors_allowed_origins))
}
