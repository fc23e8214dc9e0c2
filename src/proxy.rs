//! Forwarding of REST calls to the eduMFA backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The UI issues every backend call against its own origin. Paths below
//! `records::BACKEND_PREFIXES` that no UI route claims are relayed here:
//! method, query, `Authorization`, `Content-Type` and body go out, status,
//! `Content-Type` and body come back unchanged.
//!
//! ERROR HANDLING
//! ==============
//! An unreadable request body answers `400`; an unreachable backend `502`.
//! Backend error statuses are relayed as they are.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use records::BACKEND_PREFIXES;

/// Largest request body relayed to the backend.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("request body: {0}")]
    Body(#[from] axum::Error),
    #[error("backend: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Body(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        tracing::warn!(error = %self, %status, "proxy request failed");
        (status, self.to_string()).into_response()
    }
}

/// Backend the host relays to.
#[derive(Clone, Debug)]
pub struct Backend {
    client: reqwest::Client,
    base: String,
    instance: String,
}

impl Backend {
    #[must_use]
    pub fn new(base: &str, instance: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_owned(),
            instance: instance.to_owned(),
        }
    }

    /// Backend URL for a request path, or `None` when the path is not a
    /// backend resource under this instance.
    #[must_use]
    pub fn target(&self, path: &str, query: Option<&str>) -> Option<String> {
        let path = backend_path(&self.instance, path)?;
        Some(match query.filter(|q| !q.is_empty()) {
            Some(query) => format!("{}{path}?{query}", self.base),
            None => format!("{}{path}", self.base),
        })
    }
}

/// Strip `instance` from `path` and keep it only if its first segment is a
/// backend prefix.
#[must_use]
pub fn backend_path<'a>(instance: &str, path: &'a str) -> Option<&'a str> {
    let rest = path.strip_prefix(instance)?;
    if !rest.starts_with('/') {
        return None;
    }
    let first = rest[1..].split('/').next().unwrap_or_default();
    BACKEND_PREFIXES.contains(&first).then_some(rest)
}

/// Headers copied onto the outgoing request.
#[must_use]
pub fn forwarded_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in [AUTHORIZATION, CONTENT_TYPE] {
        if let Some(value) = headers.get(&name) {
            out.insert(name, value.clone());
        }
    }
    out
}

/// Fallback handler: relay backend paths, `404` for everything else.
pub async fn forward(State(backend): State<Backend>, request: Request) -> Result<Response, ProxyError> {
    let Some(url) = backend.target(request.uri().path(), request.uri().query()) else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };
    let method = request.method().clone();
    let headers = forwarded_headers(request.headers());
    let body = to_bytes(request.into_body(), MAX_BODY_BYTES).await?;

    tracing::debug!(%method, %url, "forwarding to backend");
    let upstream = backend
        .client
        .request(method, &url)
        .headers(headers)
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
    let bytes = upstream.bytes().await?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    Ok(response)
}
