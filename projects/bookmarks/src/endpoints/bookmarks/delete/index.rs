use axum::{
    extract::{Extension, State},
    http::StatusCode,
};
use tracing::info;

use crate::{
    db::bookmark::models::Bookmark,
    endpoints::bookmarks::{error::ApiError, AppState},
};

/// Axum handler: DELETE /{bookmark_id}
///
/// Answers 204 whatever row count storage reports.
pub async fn handler(
    State(state): State<AppState>,
    Extension(bookmark): Extension<Bookmark>,
) -> Result<StatusCode, ApiError> {
    let rows = state.bookmarks.delete_bookmark(bookmark.id).await?;
    info!(id = %bookmark.id, rows, "deleted bookmark");

    Ok(StatusCode::NO_CONTENT)
}
