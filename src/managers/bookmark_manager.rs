//! Bookmark storage gateway.
//!
//! Implements `BookmarkManagerTrait`: the four row operations on the
//! `bookmarks` table, backed by SQLite via `rusqlite`. No validation happens
//! here; callers hand in an already validated [`NewBookmark`].

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::errors::BookmarkError;

const SELECT_COLUMNS: &str = "SELECT id, title, url, description, rating FROM bookmarks";

/// Trait defining bookmark storage operations.
pub trait BookmarkManagerTrait {
    /// All bookmarks, in insertion order.
    fn list_bookmarks(&self) -> Result<Vec<Bookmark>, BookmarkError>;
    /// The bookmark with `id`, or `None` when no row matches.
    fn get_bookmark(&self, id: &str) -> Result<Option<Bookmark>, BookmarkError>;
    /// Persists `bookmark` under a freshly generated id and returns the stored row.
    fn insert_bookmark(&mut self, bookmark: &NewBookmark) -> Result<Bookmark, BookmarkError>;
    /// Removes the bookmark with `id`. Returns `false` if there was nothing to delete.
    fn delete_bookmark(&mut self, id: &str) -> Result<bool, BookmarkError>;
    fn count_bookmarks(&self) -> Result<i64, BookmarkError>;
}

/// Bookmark manager backed by a SQLite connection.
pub struct BookmarkManager<'a> {
    conn: &'a Connection,
}

impl<'a> BookmarkManager<'a> {
    /// Creates a new `BookmarkManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Reads a single `Bookmark` row into a struct.
    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            description: row.get(3)?,
            rating: row.get(4)?,
        })
    }
}

impl<'a> BookmarkManagerTrait for BookmarkManager<'a> {
    fn list_bookmarks(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY rowid", SELECT_COLUMNS))?;

        let rows = stmt.query_map([], Self::row_to_bookmark)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    fn get_bookmark(&self, id: &str) -> Result<Option<Bookmark>, BookmarkError> {
        let bookmark = self
            .conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                Self::row_to_bookmark,
            )
            .optional()?;
        Ok(bookmark)
    }

    fn insert_bookmark(&mut self, bookmark: &NewBookmark) -> Result<Bookmark, BookmarkError> {
        let id = Uuid::new_v4().to_string();

        self.conn.execute(
            "INSERT INTO bookmarks (id, title, url, description, rating) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id,
                bookmark.title,
                bookmark.url,
                bookmark.description,
                bookmark.rating
            ],
        )?;

        Ok(Bookmark {
            id,
            title: bookmark.title.clone(),
            url: bookmark.url.clone(),
            description: bookmark.description.clone(),
            rating: bookmark.rating,
        })
    }

    fn delete_bookmark(&mut self, id: &str) -> Result<bool, BookmarkError> {
        let affected = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    fn count_bookmarks(&self) -> Result<i64, BookmarkError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))?;
        Ok(count)
    }
}
