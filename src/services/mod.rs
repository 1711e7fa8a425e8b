// Bookmarks API services
// Services hold request logic: validation, access control and settings.

pub mod access_guard;
pub mod bookmark_service;
pub mod settings_engine;
