//! Shared eduMFA REST wire model for the admin UI and its host.
//!
//! This crate owns the JSON envelope every eduMFA endpoint answers with, the
//! configuration records the UI edits, and the endpoint paths both the
//! browser client and the forwarding host agree on. Payloads the UI only
//! displays stay loosely typed (`serde_json::Value`) so backend additions do
//! not break decoding.


pub mod endpoints;
pub mod machine;
pub mod recovery;
pub mod server;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use endpoints::{BACKEND_PREFIXES, Endpoints};
pub use machine::{
    ApplicationDefinitions, AttachTokenParams, ClientEntry, ClientTypes, Machine, MachineFilter, MachineToken,
    MachineTokenFilter, MachineTokenKey, MachineTokenPage, TokenOptionParams,
};
pub use recovery::{PasswordReset, RecoveryCodeRequest};
pub use server::{EduMfaServer, EduMfaServerMap, EduMfaServerParams, EduMfaServerTest};

/// Failure of a single REST exchange.
///
/// Every variant is handed to the auth-error handler unchanged; only that
/// handler decides whether the failure means an expired session.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (network, CORS, abort).
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("server responded with {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the eduMFA envelope, or the status text.
        message: String,
        /// Raw response body.
        body: Value,
    },
    /// The body could not be decoded into the expected envelope.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error, pulling `result.error.message` out of the body
    /// when the backend supplied one.
    #[must_use]
    pub fn from_response(status: u16, body: Value) -> Self {
        let message = body
            .pointer("/result/error/message")
            .and_then(Value::as_str)
            .map_or_else(|| format!("HTTP {status}"), str::to_owned);
        Self::Status { status, message, body }
    }

    /// HTTP status code, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Whether the server rejected the bearer token.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Human-readable message suitable for a notification.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            Self::Transport(msg) | Self::Decode(msg) => msg.clone(),
        }
    }
}

/// The JSON envelope wrapping every eduMFA response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Outcome of the call.
    pub result: ApiResult<T>,
    /// Server software version string, e.g. `"eduMFA 2.1.0"`.
    pub version: Option<String>,
    /// Bare version number.
    pub versionnumber: Option<String>,
    /// Optional free-form detail object (messages, serials, ...).
    pub detail: Option<Value>,
}

/// The `result` member of the envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResult<T> {
    /// `false` when the backend refused the request for business reasons.
    #[serde(default)]
    pub status: bool,
    /// The payload; absent on errors.
    pub value: Option<T>,
    /// Error description; present when `status` is `false`.
    pub error: Option<ResultError>,
}

/// Backend error description inside `result.error`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultError {
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Whether the backend reported `result.status == true`.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.result.status
    }

    /// Borrow the payload.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.result.value.as_ref()
    }

    /// Take the payload.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        self.result.value
    }

    /// Backend error message, if the result carried one.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.result.error.as_ref().map(|e| e.message.as_str())
    }
}

impl ApiResponse<Value> {
    /// `true` only when `result.value` is the JSON boolean `true`.
    ///
    /// Strings, numbers and a missing value all count as not-true.
    #[must_use]
    pub fn value_is_true(&self) -> bool {
        matches!(self.result.value, Some(Value::Bool(true)))
    }
}

/// Decode a raw JSON body into an envelope.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the body does not match the envelope or
/// the payload type.
pub fn decode_response<T>(body: Value) -> Result<ApiResponse<T>, ApiError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}
