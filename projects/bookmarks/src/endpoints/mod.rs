pub mod bookmarks;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use bookmarks::AppState;

/// Builds the full application: the bookmarks resource under `mount_path`,
/// a `/health` route, request tracing and CORS.
///
/// The collection answers both with and without a trailing slash.
pub fn app(state: AppState, mount_path: &str) -> Router {
    let resource = bookmarks::router(state.clone());
    let mount_path = mount_path.trim_end_matches('/');

    // axum refuses to nest at the root.
    let router = if mount_path.is_empty() {
        Router::new().merge(resource)
    } else {
        let with_slash = Router::new()
            .route(&format!("{mount_path}/"), bookmarks::collection())
            .with_state(state);
        Router::new().nest(mount_path, resource).merge(with_slash)
    };

    router
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Axum handler: GET /health
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
