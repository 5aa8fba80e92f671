use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::bookmark::models::Bookmark,
    utils::sanitize::{sanitize, sanitize_opt},
};

/// Wire shape of a bookmark. String fields are filtered before they leave
/// the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkResponse {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: i32,
}

impl BookmarkResponse {
    /// Single-record shape used by create and read. `url` is passed through.
    pub fn record(bookmark: &Bookmark) -> Self {
        Self {
            id: bookmark.id,
            title: sanitize(&bookmark.title),
            url: bookmark.url.clone(),
            description: sanitize_opt(bookmark.description.as_deref()),
            rating: bookmark.rating,
        }
    }

    /// Shape used by the list endpoint, which also filters `url`.
    pub fn listing(bookmark: &Bookmark) -> Self {
        Self {
            url: sanitize(&bookmark.url),
            ..Self::record(bookmark)
        }
    }
}
