//! App core for the bookmarks server.
//!
//! Central struct shared by every request: the database connection and the
//! access guard token. The connection is the only mutable state in the process.

use std::sync::{Mutex, MutexGuard};

use zeroize::Zeroizing;

use crate::database::connection::Database;
use crate::services::access_guard::ApiToken;
use crate::types::errors::{ApiError, SettingsError};
use crate::types::settings::ServerSettings;

/// Shared application state.
///
/// `BookmarkManager` borrows the connection with a lifetime, so it is created
/// per request from [`App::db`] rather than stored here.
pub struct App {
    db: Mutex<Database>,
    api_token: ApiToken,
}

impl App {
    /// Opens the configured database and prepares the access guard.
    pub fn new(settings: &ServerSettings) -> Result<Self, Box<dyn std::error::Error>> {
        let token = settings
            .api_token
            .clone()
            .ok_or(SettingsError::MissingApiToken)?;
        let db = Database::open(&settings.database_path)?;
        Ok(Self::from_parts(db, Zeroizing::new(token))?)
    }

    /// Builds an app over an existing database.
    pub fn from_parts(db: Database, token: Zeroizing<String>) -> Result<Self, SettingsError> {
        Ok(Self {
            db: Mutex::new(db),
            api_token: ApiToken::new(token)?,
        })
    }

    /// In-memory app, for tests and demos.
    pub fn in_memory(token: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open_in_memory()?;
        Ok(Self::from_parts(db, Zeroizing::new(token.to_string()))?)
    }

    /// Locks the database for the duration of one storage call.
    ///
    /// Storage access is serialized: there is one connection, and each request
    /// holds this lock (blocking its worker thread) while its query runs.
    /// Never hold the guard across an `.await`.
    pub fn db(&self) -> Result<MutexGuard<'_, Database>, ApiError> {
        self.db
            .lock()
            .map_err(|e| ApiError::Storage(format!("database lock poisoned: {}", e)))
    }

    pub fn api_token(&self) -> &ApiToken {
        &self.api_token
    }
}
