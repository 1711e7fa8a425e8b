use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

// === ValidationError ===

/// Rejections of a bookmark creation payload. The display text is the
/// message returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent or empty. Holds the client-facing field label.
    #[error("{0} is required")]
    MissingField(&'static str),
    /// The rating did not convert to a finite number.
    #[error("Rating must be a number")]
    InvalidRating,
    /// The URL lacks an http(s) scheme or a host.
    #[error("Please provide a valid URL")]
    InvalidUrl,
    /// The body was not valid JSON or a field had the wrong JSON type.
    #[error("Invalid JSON body")]
    MalformedBody,
}

// === BookmarkError ===

/// Errors raised by the bookmark storage gateway.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// Database operation failed.
    #[error("Bookmark database error: {0}")]
    DatabaseError(String),
}

impl From<rusqlite::Error> for BookmarkError {
    fn from(e: rusqlite::Error) -> Self {
        BookmarkError::DatabaseError(e.to_string())
    }
}

// === SettingsError ===

/// Errors related to loading server settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading the settings file.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to parse the settings file.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// A settings value could not be interpreted.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
    /// No API token was configured.
    #[error("API token is not configured (set API_TOKEN)")]
    MissingApiToken,
}

// === ApiError ===

/// Outcome of a request that did not succeed, shaped for an HTTP response.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Bookmark not found")]
    NotFound,
    #[error("Unauthorized request")]
    Unauthorized,
    /// Storage failure. The detail is logged, never sent to the client.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<BookmarkError> for ApiError {
    fn from(e: BookmarkError) -> Self {
        match e {
            BookmarkError::DatabaseError(msg) => ApiError::Storage(msg),
        }
    }
}

impl ApiError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `{"message": ...}` response body.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Storage(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage(detail) = &self {
            tracing::error!(%detail, "storage failure");
        }
        let body = Json(json!({ "message": self.client_message() }));
        (self.status(), body).into_response()
    }
}
