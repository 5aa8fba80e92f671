use std::{collections::BTreeMap, sync::RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use super::{BookmarksService, StoreError};
use crate::db::bookmark::models::{Bookmark, BookmarkChanges, BookmarkId, NewBookmark};

/// Process-local store for tests and database-less runs.
///
/// Listing follows insertion order.
#[derive(Debug, Default)]
pub struct InMemoryBookmarksService {
    entries: RwLock<BTreeMap<u64, Bookmark>>,
}

impl InMemoryBookmarksService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store, assigning ids as `insert_bookmark` would.
    pub fn with_bookmarks(bookmarks: impl IntoIterator<Item = NewBookmark>) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.write() {
            for new in bookmarks {
                let seq = entries.len() as u64;
                entries.insert(seq, new.into_bookmark(Uuid::new_v4()));
            }
        }
        store
    }

    fn poisoned() -> StoreError {
        StoreError::Unavailable { reason: "bookmark map lock poisoned".to_owned() }
    }
}

#[async_trait]
impl BookmarksService for InMemoryBookmarksService {
    async fn get_all_bookmarks(&self) -> Result<Vec<Bookmark>, StoreError> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries.values().cloned().collect())
    }

    async fn get_by_id(&self, id: BookmarkId) -> Result<Option<Bookmark>, StoreError> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries.values().find(|bookmark| bookmark.id == id).cloned())
    }

    async fn insert_bookmark(&self, new: NewBookmark) -> Result<Bookmark, StoreError> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        let seq = entries.keys().next_back().map_or(0, |last| last + 1);
        let bookmark = new.into_bookmark(Uuid::new_v4());
        entries.insert(seq, bookmark.clone());
        Ok(bookmark)
    }

    async fn delete_bookmark(&self, id: BookmarkId) -> Result<usize, StoreError> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        let before = entries.len();
        entries.retain(|_, bookmark| bookmark.id != id);
        Ok(before - entries.len())
    }

    async fn update_bookmark(
        &self,
        id: BookmarkId,
        changes: BookmarkChanges,
    ) -> Result<usize, StoreError> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        match entries.values_mut().find(|bookmark| bookmark.id == id) {
            Some(bookmark) if !changes.is_empty() => {
                changes.apply_to(bookmark);
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_bookmark(title: &str, rating: i32) -> NewBookmark {
        NewBookmark {
            title: title.to_owned(),
            url: format!("https://example.com/{title}"),
            description: None,
            rating,
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_lists_in_insertion_order() -> Result<(), StoreError> {
        let store = InMemoryBookmarksService::new();
        let first = store.insert_bookmark(new_bookmark("first", 1)).await?;
        let second = store.insert_bookmark(new_bookmark("second", 2)).await?;
        assert_ne!(first.id, second.id);

        let all = store.get_all_bookmarks().await?;
        let titles: Vec<&str> = all.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
        Ok(())
    }

    #[tokio::test]
    async fn delete_reports_rows_removed() -> Result<(), StoreError> {
        let store = InMemoryBookmarksService::with_bookmarks([new_bookmark("a", 3)]);
        let id = store.get_all_bookmarks().await?[0].id;

        assert_eq!(store.delete_bookmark(id).await?, 1);
        assert_eq!(store.delete_bookmark(id).await?, 0);
        assert!(store.get_by_id(id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_changes_nothing() -> Result<(), StoreError> {
        let store = InMemoryBookmarksService::new();
        let changes = BookmarkChanges { rating: Some(1), ..Default::default() };
        assert_eq!(store.update_bookmark(Uuid::new_v4(), changes).await?, 0);
        Ok(())
    }
}
