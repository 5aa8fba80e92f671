use diesel::prelude::*;
use thiserror::Error;
use crate::db::{bookmark::models::*, schema::bookmarks::dsl::*};

#[derive(Debug, Error)]
pub enum GetAllBookmarksError {
    #[error("GetAllBookmarks: {source}")]
    GetAllBookmarks {
        #[from]
        source: diesel::result::Error,
    },
}

type AllBookmarks = diesel::dsl::Order<
    diesel::dsl::Select<bookmarks, diesel::dsl::AsSelect<Bookmark, diesel::pg::Pg>>,
    seq,
>;

/// Every bookmark in insertion order. `id` is a random UUID, so `seq`
/// carries the order.
fn all_bookmarks() -> AllBookmarks {
    bookmarks.select(Bookmark::as_select()).order_by(seq)
}

pub fn get_all_bookmarks(
    conn: &mut PgConnection,
) -> Result<Vec<Bookmark>, GetAllBookmarksError> {
    all_bookmarks()
        .load(conn)
        .map_err(|source| GetAllBookmarksError::GetAllBookmarks { source })
}

#[derive(Debug, Error)]
pub enum GetBookmarkByIdError {
    #[error("GetBookmarkById: {source}")]
    GetBookmarkById {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn get_bookmark_by_id(
    conn: &mut PgConnection,
    id_val: BookmarkId,
) -> Result<Option<Bookmark>, GetBookmarkByIdError> {
    bookmarks
        .find(id_val)
        .select(Bookmark::as_select())
        .first(conn)
        .optional()
        .map_err(|source| GetBookmarkByIdError::GetBookmarkById { source })
}

#[derive(Debug, Error)]
pub enum InsertBookmarkError {
    #[error("InsertBookmark: {source}")]
    InsertBookmark {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn insert_bookmark(
    conn: &mut PgConnection,
    new: &NewBookmark,
) -> Result<Bookmark, InsertBookmarkError> {
    diesel::insert_into(bookmarks)
        .values(new)
        .returning(Bookmark::as_returning())
        .get_result(conn)
        .map_err(|source| InsertBookmarkError::InsertBookmark { source })
}

#[derive(Debug, Error)]
pub enum DeleteBookmarkError {
    #[error("DeleteBookmark: {source}")]
    DeleteBookmark {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn delete_bookmark(
    conn: &mut PgConnection,
    id_val: BookmarkId,
) -> Result<usize, DeleteBookmarkError> {
    diesel::delete(bookmarks.find(id_val))
        .execute(conn)
        .map_err(|source| DeleteBookmarkError::DeleteBookmark { source })
}

#[derive(Debug, Error)]
pub enum UpdateBookmarkError {
    #[error("UpdateBookmark: {source}")]
    UpdateBookmark {
        #[from]
        source: diesel::result::Error,
    },
}

/// Returns the number of rows updated. An empty changeset is a no-op, since
/// diesel refuses to build an `UPDATE` without a `SET` clause.
pub fn update_bookmark(
    conn: &mut PgConnection,
    id_val: BookmarkId,
    changes: &BookmarkChanges,
) -> Result<usize, UpdateBookmarkError> {
    if changes.is_empty() {
        return Ok(0);
    }

    diesel::update(bookmarks.find(id_val))
        .set(changes)
        .execute(conn)
        .map_err(|source| UpdateBookmarkError::UpdateBookmark { source })
}
