use async_trait::async_trait;
use diesel::PgConnection;
use tracing::debug;

use super::{BookmarksService, StoreError};
use crate::db::{
    bookmark::{
        models::{Bookmark, BookmarkChanges, BookmarkId, NewBookmark},
        queries,
    },
    PgPool,
};

/// Diesel-backed store. Each call checks a connection out of the pool and
/// runs on the blocking thread pool.
#[derive(Clone)]
pub struct PgBookmarksService {
    pool: PgPool,
}

impl PgBookmarksService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn with_conn<T, F>(&self, query: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            query(&mut conn)
        })
        .await?
    }
}

#[async_trait]
impl BookmarksService for PgBookmarksService {
    async fn get_all_bookmarks(&self) -> Result<Vec<Bookmark>, StoreError> {
        self.with_conn(|conn| Ok(queries::get_all_bookmarks(conn)?)).await
    }

    async fn get_by_id(&self, id: BookmarkId) -> Result<Option<Bookmark>, StoreError> {
        self.with_conn(move |conn| Ok(queries::get_bookmark_by_id(conn, id)?)).await
    }

    async fn insert_bookmark(&self, new: NewBookmark) -> Result<Bookmark, StoreError> {
        self.with_conn(move |conn| Ok(queries::insert_bookmark(conn, &new)?)).await
    }

    async fn delete_bookmark(&self, id: BookmarkId) -> Result<usize, StoreError> {
        let rows = self
            .with_conn(move |conn| Ok(queries::delete_bookmark(conn, id)?))
            .await?;
        debug!(%id, rows, "deleted bookmark rows");
        Ok(rows)
    }

    async fn update_bookmark(
        &self,
        id: BookmarkId,
        changes: BookmarkChanges,
    ) -> Result<usize, StoreError> {
        let rows = self
            .with_conn(move |conn| Ok(queries::update_bookmark(conn, id, &changes)?))
            .await?;
        debug!(%id, rows, "updated bookmark rows");
        Ok(rows)
    }
}
