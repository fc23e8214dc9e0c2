//! HTTP exchange seam between the resource API and the browser.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: `BrowserTransport` reports that no
//! network is available; tests substitute an in-memory transport.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use records::ApiError;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// One outgoing request. `url` carries no query string; `query` is encoded
/// by [`HttpRequest::full_url`].
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub authorization: Option<String>,
}

impl HttpRequest {
    fn new(method: Method, url: String) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            body: None,
            authorization: None,
        }
    }

    #[must_use]
    pub fn get(url: String) -> Self {
        Self::new(Method::Get, url)
    }

    #[must_use]
    pub fn post(url: String, body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::new(Method::Post, url)
        }
    }

    #[must_use]
    pub fn delete(url: String) -> Self {
        Self::new(Method::Delete, url)
    }

    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// URL with the form-encoded query appended.
    #[must_use]
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.query)
            .finish();
        format!("{}?{query}", self.url)
    }
}

/// Status and JSON body of a completed exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Parse a response body. Empty bodies become `null`; non-JSON text is kept
/// as a string so error pages still reach the auth handler.
#[must_use]
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

/// Sends requests. A returned `Err` means no HTTP response was obtained;
/// any HTTP status is an `Ok`.
pub trait Transport: Send + Sync + 'static {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, ApiError>>;
}

/// `fetch`-backed transport used in the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, ApiError>> {
        async move {
            #[cfg(feature = "hydrate")]
            {
                fetch(request).await
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = request;
                Err(ApiError::Transport("not available on server".to_owned()))
            }
        }
        .boxed_local()
    }
}

#[cfg(feature = "hydrate")]
async fn fetch(request: HttpRequest) -> Result<HttpResponse, ApiError> {
    use gloo_net::http::{Request, RequestBuilder};

    let transport = |e: gloo_net::Error| ApiError::Transport(e.to_string());
    let url = request.full_url();
    let mut builder: RequestBuilder = match request.method {
        Method::Get => Request::get(&url),
        Method::Post => Request::post(&url),
        Method::Delete => Request::delete(&url),
    };
    if let Some(token) = &request.authorization {
        builder = builder.header("Authorization", token);
    }
    let outgoing = match &request.body {
        Some(body) => builder.json(body).map_err(transport)?,
        None => builder.build().map_err(transport)?,
    };
    let resp = outgoing.send().await.map_err(transport)?;
    let status = resp.status();
    let text = resp.text().await.map_err(transport)?;
    Ok(HttpResponse {
        status,
        body: parse_body(&text),
    })
}
