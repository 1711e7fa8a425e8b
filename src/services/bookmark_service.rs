//! Bookmark request handling: payload validation and orchestration of the
//! storage gateway.
//!
//! Every function here is transport-agnostic. They return [`ApiError`] so the
//! HTTP layer only has to pick a status code and serialize.

use url::Url;

use crate::managers::bookmark_manager::BookmarkManagerTrait;
use crate::types::bookmark::{Bookmark, NewBookmark, NewBookmarkRequest, RatingInput};
use crate::types::errors::{ApiError, ValidationError};

/// Returns the field value if it holds something other than whitespace.
fn present<'a>(value: &'a Option<String>, label: &'static str) -> Result<&'a str, ValidationError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(label)),
    }
}

/// Converts a wire rating into a finite number.
///
/// Strings are trimmed and parsed as decimal; `0x`/`0o`/`0b` prefixes are
/// not accepted. `NaN` and infinities are rejected because they cannot be
/// stored or serialized as JSON numbers.
pub fn parse_rating(rating: &RatingInput) -> Result<f64, ValidationError> {
    let value = match rating {
        RatingInput::Number(n) => *n,
        RatingInput::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidRating)?,
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::InvalidRating)
    }
}

/// True for absolute `http`/`https` URLs with a non-empty host.
///
/// The raw text must spell `scheme://` itself. The parser would otherwise
/// repair `https:example.com` or `https:/example.com`, and the unrepaired
/// text is what gets stored.
pub fn is_valid_url(candidate: &str) -> bool {
    let raw = candidate.trim();
    let spelled_scheme = match raw.split_once("://") {
        Some((scheme, _)) => {
            scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
        }
        None => false,
    };
    if !spelled_scheme {
        return false;
    }
    match Url::parse(raw) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().map_or(false, |h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// Validates a creation payload.
///
/// Checks run in a fixed order and the first failure wins: presence of
/// title, url, description and rating, then the rating's numeric value,
/// then the URL's shape.
pub fn validate_new_bookmark(req: &NewBookmarkRequest) -> Result<NewBookmark, ValidationError> {
    let title = present(&req.title, "Title")?;
    let url = present(&req.url, "URL")?;
    let description = present(&req.description, "Description")?;
    let rating = match &req.rating {
        Some(RatingInput::Text(s)) if s.trim().is_empty() => {
            return Err(ValidationError::MissingField("Rating"))
        }
        Some(r) => r,
        None => return Err(ValidationError::MissingField("Rating")),
    };

    let rating = parse_rating(rating)?;

    if !is_valid_url(url) {
        return Err(ValidationError::InvalidUrl);
    }

    Ok(NewBookmark {
        title: title.to_string(),
        url: url.to_string(),
        description: description.to_string(),
        rating,
    })
}

/// Lists every stored bookmark.
pub fn list_bookmarks<M: BookmarkManagerTrait>(mgr: &M) -> Result<Vec<Bookmark>, ApiError> {
    let bookmarks = mgr.list_bookmarks()?;
    tracing::info!(count = bookmarks.len(), "listed bookmarks");
    Ok(bookmarks)
}

/// Fetches one bookmark, mapping an empty result to [`ApiError::NotFound`].
pub fn get_bookmark<M: BookmarkManagerTrait>(mgr: &M, id: &str) -> Result<Bookmark, ApiError> {
    match mgr.get_bookmark(id)? {
        Some(bookmark) => {
            tracing::info!(%id, "fetched bookmark");
            Ok(bookmark)
        }
        None => {
            tracing::error!(%id, "bookmark not found");
            Err(ApiError::NotFound)
        }
    }
}

/// Validates and persists a new bookmark, returning the stored record.
pub fn create_bookmark<M: BookmarkManagerTrait>(
    mgr: &mut M,
    req: &NewBookmarkRequest,
) -> Result<Bookmark, ApiError> {
    let new_bookmark = validate_new_bookmark(req).map_err(|e| {
        match &e {
            ValidationError::InvalidRating => {
                tracing::error!(rating = ?req.rating, "rejected bookmark: {}", e)
            }
            ValidationError::InvalidUrl => {
                tracing::error!(url = ?req.url, "rejected bookmark: {}", e)
            }
            _ => tracing::error!("rejected bookmark: {}", e),
        }
        e
    })?;

    let stored = mgr.insert_bookmark(&new_bookmark)?;
    tracing::info!(id = %stored.id, "new bookmark added");
    Ok(stored)
}

/// Deletes a bookmark, mapping "nothing deleted" to [`ApiError::NotFound`].
pub fn delete_bookmark<M: BookmarkManagerTrait>(mgr: &mut M, id: &str) -> Result<(), ApiError> {
    if mgr.delete_bookmark(id)? {
        tracing::info!(%id, "bookmark deleted");
        Ok(())
    } else {
        tracing::error!(%id, "bookmark not found");
        Err(ApiError::NotFound)
    }
}
