//! Request bodies and the checks that turn them into storage values.
//!
//! Presence is decided per type rather than by truthiness: a text field is
//! missing when absent, `null` or empty, and `rating` is missing only when
//! absent or `null`. A rating of `0` is therefore accepted on create.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::{
    db::bookmark::models::{BookmarkChanges, NewBookmark},
    utils::web_uri::is_web_uri,
};

pub const MIN_RATING: i32 = 0;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{field}' is required")]
    MissingField { field: &'static str },
    #[error("'rating' must be a number between 0 and 5")]
    InvalidRating,
    #[error("'url' must be a valid URL")]
    InvalidUrl,
    #[error("Request body must contain either 'title', 'url', or 'rating'")]
    NoUpdatableField,
}

/// `POST /` body. `rating` stays untyped so a non-integer is reported as a
/// rating error rather than a body error.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBookmarkBody {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<Value>,
}

/// `PATCH /:bookmark_id` body.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookmarkBody {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<Value>,
}

pub fn validate_new_bookmark(body: CreateBookmarkBody) -> Result<NewBookmark, ValidationError> {
    let title = present_text(body.title);
    let url = present_text(body.url);
    let rating = body.rating;

    let title = title.ok_or(ValidationError::MissingField { field: "title" })?;
    let url = url.ok_or(ValidationError::MissingField { field: "url" })?;
    let rating = rating.ok_or(ValidationError::MissingField { field: "rating" })?;

    let rating = parse_rating(&rating)?;
    if !is_web_uri(&url) {
        return Err(ValidationError::InvalidUrl);
    }

    Ok(NewBookmark { title, url, description: body.description, rating })
}

/// Empty strings count as not supplied and are left out of the changeset.
/// `url` is not re-checked here; `rating` is, so stored ratings stay in range.
pub fn validate_changes(body: UpdateBookmarkBody) -> Result<BookmarkChanges, ValidationError> {
    let title = present_text(body.title);
    let url = present_text(body.url);
    let description = present_text(body.description);

    if title.is_none() && url.is_none() && body.rating.is_none() {
        return Err(ValidationError::NoUpdatableField);
    }

    let rating = body.rating.as_ref().map(parse_rating).transpose()?;

    Ok(BookmarkChanges { title, url, description, rating })
}

/// Accepts JSON numbers with no fractional part in `[MIN_RATING, MAX_RATING]`.
pub fn parse_rating(value: &Value) -> Result<i32, ValidationError> {
    let number = value.as_f64().ok_or(ValidationError::InvalidRating)?;
    if number.fract() != 0.0 || number < f64::from(MIN_RATING) || number > f64::from(MAX_RATING) {
        return Err(ValidationError::InvalidRating);
    }
    // In range, so the cast is exact.
    Ok(number as i32)
}

fn present_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn body(value: Value) -> CreateBookmarkBody {
        match serde_json::from_value(value) {
            Ok(body) => body,
            Err(e) => panic!("invalid test body: {e}"),
        }
    }

    fn patch(value: Value) -> UpdateBookmarkBody {
        match serde_json::from_value(value) {
            Ok(body) => body,
            Err(e) => panic!("invalid test body: {e}"),
        }
    }

    #[test]
    fn valid_body_becomes_new_bookmark() {
        let new = validate_new_bookmark(body(json!({
            "title": "Example",
            "url": "https://example.com",
            "rating": 4,
            "description": "d",
        })));
        assert_eq!(
            new,
            Ok(NewBookmark {
                title: "Example".to_owned(),
                url: "https://example.com".to_owned(),
                description: Some("d".to_owned()),
                rating: 4,
            })
        );
    }

    #[test]
    fn missing_fields_are_reported_in_order() {
        let err = validate_new_bookmark(body(json!({})));
        assert_eq!(err, Err(ValidationError::MissingField { field: "title" }));

        let err = validate_new_bookmark(body(json!({ "title": "t", "url": "", "rating": 1 })));
        assert_eq!(err, Err(ValidationError::MissingField { field: "url" }));

        let err = validate_new_bookmark(body(json!({ "title": "t", "url": "https://a.b", "rating": null })));
        assert_eq!(err, Err(ValidationError::MissingField { field: "rating" }));
    }

    #[test]
    fn zero_rating_counts_as_present() {
        let new = validate_new_bookmark(body(json!({ "title": "t", "url": "https://a.b", "rating": 0 })));
        assert_eq!(new.map(|n| n.rating), Ok(0));
    }

    #[test]
    fn rating_is_checked_before_url() {
        let err = validate_new_bookmark(body(json!({ "title": "t", "url": "nope", "rating": 9 })));
        assert_eq!(err, Err(ValidationError::InvalidRating));

        let err = validate_new_bookmark(body(json!({ "title": "t", "url": "nope", "rating": 3 })));
        assert_eq!(err, Err(ValidationError::InvalidUrl));
    }

    #[test]
    fn rating_rejects_non_integers() {
        for value in [json!(1.5), json!("3"), json!(true), json!(-1), json!(6), json!([])] {
            assert_eq!(parse_rating(&value), Err(ValidationError::InvalidRating), "{value}");
        }
        assert_eq!(parse_rating(&json!(4.0)), Ok(4));
    }

    #[test]
    fn patch_requires_title_url_or_rating() {
        assert_eq!(validate_changes(patch(json!({}))), Err(ValidationError::NoUpdatableField));
        assert_eq!(
            validate_changes(patch(json!({ "description": "only" }))),
            Err(ValidationError::NoUpdatableField)
        );
        assert_eq!(
            validate_changes(patch(json!({ "title": "" }))),
            Err(ValidationError::NoUpdatableField)
        );
    }

    #[test]
    fn patch_keeps_only_supplied_fields() {
        let changes = validate_changes(patch(json!({ "rating": 2, "title": "" })));
        assert_eq!(changes, Ok(BookmarkChanges { rating: Some(2), ..Default::default() }));
    }

    #[test]
    fn patch_does_not_recheck_url() {
        let changes = validate_changes(patch(json!({ "url": "not a url" })));
        assert_eq!(changes.map(|c| c.url), Ok(Some("not a url".to_owned())));
    }

    #[test]
    fn patch_rejects_out_of_range_rating() {
        assert_eq!(
            validate_changes(patch(json!({ "rating": 10 }))),
            Err(ValidationError::InvalidRating)
        );
    }

    proptest! {
        #[test]
        fn rating_accepts_exactly_zero_to_five(n in -100i64..100) {
            let parsed = parse_rating(&json!(n));
            if (0..=5).contains(&n) {
                prop_assert_eq!(parsed, Ok(n as i32));
            } else {
                prop_assert_eq!(parsed, Err(ValidationError::InvalidRating));
            }
        }
    }
}
