// Bookmarks API storage managers
// Managers own the SQL for one table each and contain no request logic.

pub mod bookmark_manager;
