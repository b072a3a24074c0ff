//! Route definitions for the FolderHub HTTP API.
//!
//! Hierarchy routes are mounted under `/api`; the health probe sits at the
//! top level. The router receives `AppState` and passes it to all handlers
//! via Axum's `State` extractor.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::{delete, get, patch, post};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use folderhub_core::config::CorsConfig;

use crate::extractors::DEVICE_HEADER;
use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new().merge(folder_routes()).merge(file_routes());

    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(TimeoutLayer::new(timeout)),
        )
        .with_state(state)
}

/// Folder hierarchy, tree, and breadcrumbs
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::list_folders).post(handlers::folder::create_folder),
        )
        .route("/folders/tree", get(handlers::folder::get_tree))
        .route(
            "/folders/{id}",
            patch(handlers::folder::update_folder).delete(handlers::folder::delete_folder),
        )
        .route(
            "/folders/{id}/breadcrumbs",
            get(handlers::folder::get_breadcrumbs),
        )
}

/// File registration, listing, and filing
fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files",
            get(handlers::file::list_files).post(handlers::file::register_file),
        )
        .route("/files/move", post(handlers::file::move_files))
        .route("/files/{id}", delete(handlers::file::delete_file))
}

/// Build CORS layer from configuration
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = if config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static(DEVICE_HEADER),
        ])
        .max_age(Duration::from_secs(config.max_age_seconds))
}
