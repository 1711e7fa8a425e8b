//! Bearer-token access guard.
//!
//! Runs in front of every route. Requests without `Authorization: Bearer <token>`
//! matching the configured API token are answered with 401 before any handler
//! or storage call runs.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use ring::digest;
use zeroize::Zeroizing;

use crate::app::App;
use crate::types::errors::{ApiError, SettingsError};

/// The configured API token, held only as its SHA-256 digest.
///
/// Comparing digests keeps the comparison time independent of how many
/// leading bytes of a presented token happen to match.
pub struct ApiToken {
    digest: Zeroizing<Vec<u8>>,
}

impl ApiToken {
    /// Builds the guard token. The plaintext is wiped when `token` drops.
    pub fn new(token: Zeroizing<String>) -> Result<Self, SettingsError> {
        if token.trim().is_empty() {
            return Err(SettingsError::MissingApiToken);
        }
        let d = digest::digest(&digest::SHA256, token.as_bytes());
        Ok(Self {
            digest: Zeroizing::new(d.as_ref().to_vec()),
        })
    }

    /// True if `presented` is the configured token.
    pub fn verify(&self, presented: &str) -> bool {
        let d = digest::digest(&digest::SHA256, presented.as_bytes());
        d.as_ref() == self.digest.as_slice()
    }
}

/// Extracts the credential from an `Authorization` header value.
///
/// The scheme is matched case-insensitively; anything but `Bearer` yields `None`.
pub fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Axum middleware rejecting unauthenticated requests.
pub async fn require_bearer_token(
    State(app): State<Arc<App>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let verdict = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_bearer)
        .map(|token| app.api_token().verify(token));

    match verdict {
        Some(true) => Ok(next.run(req).await),
        Some(false) => {
            tracing::error!(path = %req.uri().path(), "unauthorized request: invalid token");
            Err(ApiError::Unauthorized)
        }
        None => {
            tracing::error!(path = %req.uri().path(), "unauthorized request: missing bearer token");
            Err(ApiError::Unauthorized)
        }
    }
}
