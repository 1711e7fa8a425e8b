//! Property-based tests for bookmark creation and retrieval.
//!
//! For arbitrary valid payloads, creating a bookmark and then fetching it by the
//! returned id yields an equal record, and listing returns every insert in order.

use bookmarks_api::database::Database;
use bookmarks_api::managers::bookmark_manager::BookmarkManager;
use bookmarks_api::services::bookmark_service::{create_bookmark, get_bookmark, list_bookmarks};
use bookmarks_api::types::bookmark::{NewBookmarkRequest, RatingInput};
use proptest::prelude::*;

/// Strategy for generating valid URL strings.
/// Produces URLs with http/https scheme, alphanumeric host, and optional path.
fn arb_url() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("https"), Just("http")],
        "[a-z][a-z0-9]{2,15}",
        prop_oneof![Just(".com"), Just(".org"), Just(".net"), Just(".io")],
        proptest::option::of("/[a-z0-9]{1,10}"),
    )
        .prop_map(|(scheme, host, tld, path)| {
            format!("{}://{}{}{}", scheme, host, tld, path.unwrap_or_default())
        })
}

/// Non-empty text that does not start with whitespace.
fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 .,!?-]{0,40}"
}

/// Ratings sent either as numbers or as their decimal text.
fn arb_rating() -> impl Strategy<Value = (RatingInput, f64)> {
    (-1000i32..1000i32, any::<bool>()).prop_map(|(n, as_text)| {
        let value = n as f64 / 4.0;
        if as_text {
            (RatingInput::Text(value.to_string()), value)
        } else {
            (RatingInput::Number(value), value)
        }
    })
}

fn arb_request() -> impl Strategy<Value = (NewBookmarkRequest, f64)> {
    (arb_text(), arb_url(), arb_text(), arb_rating()).prop_map(
        |(title, url, description, (rating, value))| {
            (
                NewBookmarkRequest {
                    title: Some(title),
                    url: Some(url),
                    description: Some(description),
                    rating: Some(rating),
                },
                value,
            )
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn create_then_get_returns_equal_record((req, rating) in arb_request()) {
        let db = Database::open_in_memory().expect("Failed to open in-memory database");
        let mut mgr = BookmarkManager::new(db.connection());

        let created = create_bookmark(&mut mgr, &req).expect("valid payload must be accepted");
        prop_assert_eq!(Some(&created.title), req.title.as_ref());
        prop_assert_eq!(Some(&created.url), req.url.as_ref());
        prop_assert_eq!(Some(&created.description), req.description.as_ref());
        prop_assert_eq!(created.rating, rating);

        let fetched = get_bookmark(&mgr, &created.id).expect("created bookmark must be retrievable");
        prop_assert_eq!(fetched, created);
    }

    #[test]
    fn list_returns_every_insert_in_order(reqs in proptest::collection::vec(arb_request(), 0..8)) {
        let db = Database::open_in_memory().expect("Failed to open in-memory database");
        let mut mgr = BookmarkManager::new(db.connection());

        let mut ids = Vec::new();
        for (req, _) in &reqs {
            ids.push(create_bookmark(&mut mgr, req).expect("valid payload").id);
        }

        let listed: Vec<String> = list_bookmarks(&mgr).unwrap().into_iter().map(|b| b.id).collect();
        prop_assert_eq!(listed, ids);
    }
}
