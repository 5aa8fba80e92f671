use axum::{
    extract::{rejection::JsonRejection, Json, OriginalUri, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::endpoints::bookmarks::{
    error::ApiError,
    response::BookmarkResponse,
    validate::{validate_new_bookmark, CreateBookmarkBody},
    AppState,
};

/// Axum handler: POST /
pub async fn handler(
    State(state): State<AppState>,
    OriginalUri(original_uri): OriginalUri,
    payload: Result<Json<CreateBookmarkBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload?;

    let new = validate_new_bookmark(body).inspect_err(|err| {
        debug!(error = %err, "rejected bookmark creation");
    })?;

    let bookmark = state.bookmarks.insert_bookmark(new).await?;
    info!(id = %bookmark.id, "created bookmark");

    let location = location_for(original_uri.path(), bookmark.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(BookmarkResponse::record(&bookmark)),
    ))
}

/// Joins the collection path and the new id with exactly one `/`.
pub fn location_for(collection_path: &str, id: Uuid) -> String {
    format!("{}/{id}", collection_path.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_joins_without_double_slash() {
        let id = Uuid::nil();
        assert_eq!(
            location_for("/api/bookmarks", id),
            "/api/bookmarks/00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            location_for("/api/bookmarks/", id),
            "/api/bookmarks/00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(location_for("/", id), "/00000000-0000-0000-0000-000000000000");
    }
}
