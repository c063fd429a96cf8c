//! Router configuration for the board API.

use axum::{http::StatusCode, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_reply, create_thread, delete_reply, delete_thread, get_thread, list_threads,
    report_reply, report_thread, AppState,
};
use super::middleware::{cors_layer, security_headers};

/// Create the main router.
///
/// Mounts the board API under `/api` plus a `/health` probe. Unknown paths
/// answer 404 `Not Found`.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route(
            "/threads/{board}",
            get(list_threads)
                .post(create_thread)
                .put(report_thread)
                .delete(delete_thread),
        )
        .route(
            "/replies/{board}",
            get(get_thread)
                .post(create_reply)
                .put(report_reply)
                .delete(delete_reply),
        );

    let [nosniff, referrer_policy, frame_options] = security_headers();

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_origins))
                .layer(nosniff)
                .layer(referrer_policy)
                .layer(frame_options),
        )
        .with_state(state)
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
