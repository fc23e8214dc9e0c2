//! Remote eduMFA server definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A stored remote eduMFA server definition as returned by `GET /edumfaserver/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EduMfaServer {
    /// Database id.
    pub id: Option<i64>,
    pub url: String,
    /// Whether the TLS certificate of the remote server is verified.
    #[serde(default = "default_tls")]
    pub tls: bool,
    #[serde(default)]
    pub description: String,
}

/// Definitions keyed by their unique identifier.
pub type EduMfaServerMap = BTreeMap<String, EduMfaServer>;

fn default_tls() -> bool {
    true
}

/// Form state for creating or replacing a definition.
///
/// Edits replace the stored definition wholesale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EduMfaServerParams {
    pub identifier: String,
    pub url: String,
    pub tls: bool,
    #[serde(default)]
    pub description: String,
}

impl Default for EduMfaServerParams {
    fn default() -> Self {
        Self {
            identifier: String::new(),
            url: String::new(),
            tls: true,
            description: String::new(),
        }
    }
}

impl EduMfaServerParams {
    /// Project a stored record into an edit form.
    #[must_use]
    pub fn from_record(identifier: &str, record: &EduMfaServer) -> Self {
        Self {
            identifier: identifier.to_owned(),
            url: record.url.clone(),
            tls: record.tls,
            description: record.description.clone(),
        }
    }

    /// Body for `POST /edumfaserver/{identifier}`; the identifier travels in the path.
    #[must_use]
    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({
            "url": self.url,
            "tls": self.tls,
            "description": self.description,
        })
    }
}

/// Body for `POST /edumfaserver/test_request`.
///
/// The connection test authenticates a user against the remote server without storing
/// anything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EduMfaServerTest {
    pub identifier: String,
    pub url: String,
    pub tls: bool,
    pub username: String,
    pub password: String,
}

impl EduMfaServerTest {
    /// Combine the edit form with test credentials.
    #[must_use]
    pub fn new(params: &EduMfaServerParams, username: &str, password: &str) -> Self {
        Self {
            identifier: params.identifier.clone(),
            url: params.url.clone(),
            tls: params.tls,
            username: username.to_owned(),
            password: password.to_owned(),
        }
    }
}
