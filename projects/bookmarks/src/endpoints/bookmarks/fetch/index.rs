use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::endpoints::bookmarks::{error::ApiError, AppState};

/// Middleware for `/{bookmark_id}` routes: loads the bookmark once and hands
/// it to the route handler as an `Extension<Bookmark>`.
///
/// An id that is not a UUID cannot name a stored bookmark, so it is
/// answered the same way as an unknown one.
pub async fn handler(
    State(state): State<AppState>,
    Path(bookmark_id): Path<String>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Ok(id) = Uuid::parse_str(&bookmark_id) else {
        debug!(%bookmark_id, "bookmark id is not a uuid");
        return Err(ApiError::NotFound);
    };

    let bookmark = state
        .bookmarks
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    request.extensions_mut().insert(bookmark);
    Ok(next.run(request).await)
}
