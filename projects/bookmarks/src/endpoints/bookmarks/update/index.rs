use axum::{
    extract::{rejection::JsonRejection, Extension, Json, State},
    http::StatusCode,
};
use tracing::{debug, info};

use crate::{
    db::bookmark::models::Bookmark,
    endpoints::bookmarks::{
        error::ApiError,
        validate::{validate_changes, UpdateBookmarkBody},
        AppState,
    },
};

/// Axum handler: PATCH /{bookmark_id}
///
/// Answers 204 whatever row count storage reports.
pub async fn handler(
    State(state): State<AppState>,
    Extension(bookmark): Extension<Bookmark>,
    payload: Result<Json<UpdateBookmarkBody>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(body) = payload?;

    let changes = validate_changes(body).inspect_err(|err| {
        debug!(id = %bookmark.id, error = %err, "rejected bookmark update");
    })?;

    let rows = state.bookmarks.update_bookmark(bookmark.id, changes).await?;
    info!(id = %bookmark.id, rows, "updated bookmark");

    Ok(StatusCode::NO_CONTENT)
}
