//! End-to-end tests against a real listener, using a temporary on-disk database.
//!
//! These go through the same `http_handler::serve` path as the `bookmarks-api` binary.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use bookmarks_api::app::App;
use bookmarks_api::http_handler::serve;
use bookmarks_api::types::settings::ServerSettings;

const TOKEN: &str = "e2e-token";

struct TestServer {
    base: String,
    client: reqwest::Client,
    stop: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<std::io::Result<()>>,
    _tmp: TempDir,
}

impl TestServer {
    async fn start() -> Self {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let settings = ServerSettings {
            database_path: tmp.path().join("e2e.db").to_string_lossy().to_string(),
            api_token: Some(TOKEN.to_string()),
            ..Default::default()
        };
        let app = Arc::new(App::new(&settings).expect("Failed to init App"));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let (stop, stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve(listener, app, async {
            let _ = stopped.await;
        }));

        Self {
            base,
            client: reqwest::Client::new(),
            stop: Some(stop),
            handle,
            _tmp: tmp,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        self.handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn test_full_lifecycle_over_http() {
    let server = TestServer::start().await;
    let client = &server.client;

    let list: Value = client
        .get(server.url("/bookmarks"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list, json!([]));

    let res = client
        .post(server.url("/bookmarks"))
        .bearer_auth(TOKEN)
        .json(&json!({
            "title": "Tokio",
            "url": "https://tokio.rs",
            "description": "Async runtime",
            "rating": 5
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let res = client
        .get(server.url(&format!("/bookmarks/{}", id)))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), created);

    let res = client
        .delete(server.url(&format!("/bookmarks/{}", id)))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(server.url(&format!("/bookmarks/{}", id)))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"message": "Bookmark not found"})
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_requests_without_token_rejected() {
    let server = TestServer::start().await;

    let res = server.client.get(server.url("/bookmarks")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server
        .client
        .get(server.url("/bookmarks"))
        .header("Authorization", format!("Basic {}", TOKEN))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    server.shutdown().await;
}
