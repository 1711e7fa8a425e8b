use serde::{Deserialize, Serialize};

/// Represents a saved bookmark as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: f64,
}

/// A creation payload that has passed validation. The id is assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: f64,
}

/// A rating as it arrives on the wire: clients send either `4` or `"4"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RatingInput {
    Number(f64),
    Text(String),
}

/// Body of `POST /bookmarks`.
///
/// Every field is optional so that an absent field is reported by validation
/// with its name instead of failing deserialization. Unknown fields, including
/// a client-supplied `id`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewBookmarkRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<RatingInput>,
}
