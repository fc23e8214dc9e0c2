//! In-memory transport and auth collaborator for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use records::ApiError;
use serde_json::{Value, json};

use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::state::auth::AuthFactory;

type Reply = Result<HttpResponse, ApiError>;

/// Replays scripted replies per `(method, url)` and records every request.
///
/// Replies are consumed in order; the last one repeats.
#[derive(Clone, Default)]
pub struct MockTransport {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    replies: Arc<Mutex<HashMap<(Method, String), VecDeque<Reply>>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, method: Method, url: &str, status: u16, body: Value) -> &Self {
        self.push(method, url, Ok(HttpResponse { status, body }))
    }

    /// Successful envelope with `result.status = true` and the given value.
    pub fn ok(&self, method: Method, url: &str, value: Value) -> &Self {
        self.reply(method, url, 200, envelope(true, value))
    }

    pub fn fail(&self, method: Method, url: &str, error: ApiError) -> &Self {
        self.push(method, url, Err(error))
    }

    fn push(&self, method: Method, url: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry((method, url.to_owned()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn count(&self, method: Method, url: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }

    pub fn last(&self, method: Method, url: &str) -> Option<HttpRequest> {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.method == method && r.url == url)
    }
}

impl Transport for MockTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Reply> {
        let key = (request.method, request.url.clone());
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        let mut replies = self.replies.lock().unwrap_or_else(PoisonError::into_inner);
        let reply = match replies.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        }
        .unwrap_or_else(|| {
            Ok(HttpResponse {
                status: 404,
                body: json!({"result": {"status": false, "error": {"message": "no scripted reply"}}}),
            })
        });
        futures::future::ready(reply).boxed_local()
    }
}

pub fn envelope(status: bool, value: Value) -> Value {
    json!({
        "result": {"status": status, "value": value},
        "version": "eduMFA test",
        "versionnumber": "2.0",
    })
}

/// Auth collaborator with a fixed token that records every failure.
#[derive(Default)]
pub struct RecordingAuth {
    pub token: Option<String>,
    errors: Mutex<Vec<ApiError>>,
}

impl RecordingAuth {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_owned()),
            errors: Mutex::new(Vec::new()),
        }
    }

    pub fn errors(&self) -> Vec<ApiError> {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl AuthFactory for RecordingAuth {
    fn auth_token(&self) -> Option<String> {
        self.token.clone()
    }

    fn auth_error(&self, error: &ApiError) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error.clone());
    }
}
