use axum::{extract::State, Json};

use crate::endpoints::bookmarks::{error::ApiError, response::BookmarkResponse, AppState};

/// Axum handler: GET /
pub async fn handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookmarkResponse>>, ApiError> {
    let bookmarks = state.bookmarks.get_all_bookmarks().await?;

    Ok(Json(bookmarks.iter().map(BookmarkResponse::listing).collect()))
}
