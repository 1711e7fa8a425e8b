use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;

/// Runtime settings for the bookmarks server.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub api_token: Option<String>,
    pub log_level: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            database_path: "bookmarks.db".to_string(),
            api_token: None,
            log_level: "info".to_string(),
        }
    }
}

impl ServerSettings {
    /// Address string the listener binds to, e.g. `127.0.0.1:8000`.
    pub fn bind_address(&self) -> String {
        match self.host.parse::<std::net::IpAddr>() {
            Ok(ip) => SocketAddr::new(ip, self.port).to_string(),
            Err(_) => format!("{}:{}", self.host, self.port),
        }
    }
}

// Keeps the API token out of logs.
impl fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_path", &self.database_path)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("log_level", &self.log_level)
            .finish()
    }
}
