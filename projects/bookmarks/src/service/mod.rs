//! Storage collaborator used by the bookmark endpoints.
//!
//! [`BookmarksService`] is the seam between HTTP handling and persistence.
//! The binary picks [`PgBookmarksService`] when a database is configured and
//! [`InMemoryBookmarksService`] otherwise.

mod memory;
mod postgres;

pub use memory::InMemoryBookmarksService;
pub use postgres::PgBookmarksService;

use async_trait::async_trait;
use thiserror::Error;

use crate::db::bookmark::{
    models::{Bookmark, BookmarkChanges, BookmarkId, NewBookmark},
    queries::{
        DeleteBookmarkError, GetAllBookmarksError, GetBookmarkByIdError, InsertBookmarkError,
        UpdateBookmarkError,
    },
};

#[async_trait]
pub trait BookmarksService: Send + Sync {
    async fn get_all_bookmarks(&self) -> Result<Vec<Bookmark>, StoreError>;

    async fn get_by_id(&self, id: BookmarkId) -> Result<Option<Bookmark>, StoreError>;

    /// Stores `new` and returns it with its assigned id.
    async fn insert_bookmark(&self, new: NewBookmark) -> Result<Bookmark, StoreError>;

    /// Returns the number of rows removed.
    async fn delete_bookmark(&self, id: BookmarkId) -> Result<usize, StoreError>;

    /// Returns the number of rows changed.
    async fn update_bookmark(
        &self,
        id: BookmarkId,
        changes: BookmarkChanges,
    ) -> Result<usize, StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },
    #[error("BlockingTask: {source}")]
    BlockingTask {
        #[from]
        source: tokio::task::JoinError,
    },
    #[error(transparent)]
    GetAllBookmarks {
        #[from]
        source: GetAllBookmarksError,
    },
    #[error(transparent)]
    GetBookmarkById {
        #[from]
        source: GetBookmarkByIdError,
    },
    #[error(transparent)]
    InsertBookmark {
        #[from]
        source: InsertBookmarkError,
    },
    #[error(transparent)]
    DeleteBookmark {
        #[from]
        source: DeleteBookmarkError,
    },
    #[error(transparent)]
    UpdateBookmark {
        #[from]
        source: UpdateBookmarkError,
    },
    #[error("Unavailable: {reason}")]
    Unavailable { reason: String },
}
