//! Bookmarks API — a minimal bookmark-management REST service over SQLite.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod database;
pub mod http_handler;
pub mod managers;
pub mod services;
pub mod types;
