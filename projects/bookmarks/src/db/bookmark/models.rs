use uuid::Uuid;
use diesel::prelude::*;
use crate::db::schema::bookmarks;

pub type BookmarkId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = bookmarks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Bookmark {
    pub id: BookmarkId,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub rating: i32,
}

/// A validated bookmark that storage has not assigned an id to yet.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = bookmarks)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub rating: i32,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = bookmarks)]
pub struct BookmarkChanges {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<i32>,
}

impl BookmarkChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.rating.is_none()
    }

    pub fn apply_to(self, bookmark: &mut Bookmark) {
        if let Some(title) = self.title {
            bookmark.title = title;
        }
        if let Some(url) = self.url {
            bookmark.url = url;
        }
        if let Some(description) = self.description {
            bookmark.description = Some(description);
        }
        if let Some(rating) = self.rating {
            bookmark.rating = rating;
        }
    }
}

impl NewBookmark {
    pub fn into_bookmark(self, id: BookmarkId) -> Bookmark {
        Bookmark {
            id,
            title: self.title,
            url: self.url,
            description: self.description,
            rating: self.rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Bookmark {
        NewBookmark {
            title: "Rust".to_owned(),
            url: "https://www.rust-lang.org".to_owned(),
            description: None,
            rating: 5,
        }
        .into_bookmark(Uuid::nil())
    }

    #[test]
    fn changes_only_touch_supplied_fields() {
        let mut bookmark = sample();
        let changes = BookmarkChanges { rating: Some(2), ..Default::default() };
        changes.apply_to(&mut bookmark);

        assert_eq!(bookmark.rating, 2);
        assert_eq!(bookmark.title, "Rust");
        assert_eq!(bookmark.url, "https://www.rust-lang.org");
        assert_eq!(bookmark.description, None);
    }

    #[test]
    fn default_changes_are_empty() {
        assert!(BookmarkChanges::default().is_empty());
        assert!(!BookmarkChanges { description: Some("d".to_owned()), ..Default::default() }.is_empty());
    }
}
