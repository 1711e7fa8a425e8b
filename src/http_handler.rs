//! HTTP routing for the bookmarks API.
//!
//! Builds the axum [`Router`] and holds the thin handlers that translate
//! between HTTP and [`bookmark_service`]. Each handler locks the database,
//! makes one service call and serializes the outcome.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::app::App;
use crate::managers::bookmark_manager::BookmarkManager;
use crate::services::access_guard::require_bearer_token;
use crate::services::bookmark_service;
use crate::types::bookmark::{Bookmark, NewBookmarkRequest};
use crate::types::errors::{ApiError, ValidationError};

/// Builds the application router with the access guard and request logging applied.
pub fn router(app: Arc<App>) -> Router {
    Router::new()
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route("/bookmarks/:id", get(get_bookmark).delete(delete_bookmark))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(app.clone(), require_bearer_token))
        .layer(middleware::from_fn(log_requests))
        .with_state(app)
}

async fn list_bookmarks(State(app): State<Arc<App>>) -> Result<Json<Vec<Bookmark>>, ApiError> {
    let db = app.db()?;
    let mgr = BookmarkManager::new(db.connection());
    let bookmarks = bookmark_service::list_bookmarks(&mgr)?;
    Ok(Json(bookmarks))
}

async fn get_bookmark(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<Bookmark>, ApiError> {
    let db = app.db()?;
    let mgr = BookmarkManager::new(db.connection());
    let bookmark = bookmark_service::get_bookmark(&mgr, &id)?;
    Ok(Json(bookmark))
}

async fn create_bookmark(
    State(app): State<Arc<App>>,
    payload: Result<Json<NewBookmarkRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::error!("rejected bookmark body: {}", rejection.body_text());
        ValidationError::MalformedBody
    })?;

    let db = app.db()?;
    let mut mgr = BookmarkManager::new(db.connection());
    let stored = bookmark_service::create_bookmark(&mut mgr, &req)?;

    let location = format!("/bookmarks/{}", stored.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(stored),
    )
        .into_response())
}

async fn delete_bookmark(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let db = app.db()?;
    let mut mgr = BookmarkManager::new(db.connection());
    bookmark_service::delete_bookmark(&mut mgr, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" })))
}

/// One log line per request with method, path, status and latency.
async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::error!(%method, %path, status = status.as_u16(), latency_ms, "request failed");
    } else {
        tracing::info!(%method, %path, status = status.as_u16(), latency_ms, "request handled");
    }
    response
}

/// Serves the router on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: tokio::net::TcpListener, app: Arc<App>, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown)
        .await
}
