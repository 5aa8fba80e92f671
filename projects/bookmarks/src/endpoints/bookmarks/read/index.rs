use axum::{extract::Extension, Json};

use crate::{db::bookmark::models::Bookmark, endpoints::bookmarks::response::BookmarkResponse};

/// Axum handler: GET /{bookmark_id}
pub async fn handler(Extension(bookmark): Extension<Bookmark>) -> Json<BookmarkResponse> {
    Json(BookmarkResponse::record(&bookmark))
}
