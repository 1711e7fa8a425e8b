// Bookmarks API shared types
// Plain data structures and error enums used across the database, service and HTTP layers.

pub mod bookmark;
pub mod errors;
pub mod settings;
