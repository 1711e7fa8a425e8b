use axum::http::StatusCode;
use bookmarks_api::types::errors::*;

// === ValidationError Tests ===

#[test]
fn validation_error_messages() {
    assert_eq!(ValidationError::MissingField("Title").to_string(), "Title is required");
    assert_eq!(ValidationError::MissingField("URL").to_string(), "URL is required");
    assert_eq!(ValidationError::InvalidRating.to_string(), "Rating must be a number");
    assert_eq!(ValidationError::InvalidUrl.to_string(), "Please provide a valid URL");
    assert_eq!(ValidationError::MalformedBody.to_string(), "Invalid JSON body");
}

// === BookmarkError Tests ===

#[test]
fn bookmark_error_display() {
    let err = BookmarkError::DatabaseError("disk I/O error".to_string());
    assert_eq!(err.to_string(), "Bookmark database error: disk I/O error");
}

#[test]
fn bookmark_error_from_rusqlite() {
    let err: BookmarkError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, BookmarkError::DatabaseError(_)));
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("denied".to_string()).to_string(),
        "Settings I/O error: denied"
    );
    assert_eq!(
        SettingsError::InvalidValue("PORT".to_string()).to_string(),
        "Invalid settings value: PORT"
    );
    assert!(SettingsError::MissingApiToken.to_string().contains("API_TOKEN"));
}

// === ApiError Tests ===

#[test]
fn api_error_status_codes() {
    assert_eq!(
        ApiError::from(ValidationError::InvalidUrl).status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        ApiError::Storage("boom".to_string()).status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn api_error_client_messages() {
    assert_eq!(
        ApiError::from(ValidationError::MissingField("Rating")).client_message(),
        "Rating is required"
    );
    assert_eq!(ApiError::NotFound.client_message(), "Bookmark not found");
    assert_eq!(ApiError::Unauthorized.client_message(), "Unauthorized request");
}

#[test]
fn api_error_storage_detail_is_not_exposed() {
    let err = ApiError::from(BookmarkError::DatabaseError("no such table: bookmarks".to_string()));
    assert_eq!(err.client_message(), "Internal server error");
    assert!(err.to_string().contains("no such table"));
}
