//! REST endpoint paths relative to a configured base.
//!
//! Path parameters are percent-encoded so identifiers with spaces or slashes
//! address exactly one resource.

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::MachineTokenKey;

/// First path segments of every backend resource the UI talks to.
///
/// The host forwards exactly these prefixes to the eduMFA backend.
pub const BACKEND_PREFIXES: &[&str] = &["auth", "edumfaserver", "machine", "application", "client", "recover"];

/// Characters escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Encode one path segment.
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Endpoint builder anchored at the backend base path (empty for same-origin root).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self { base: base.trim_end_matches('/').to_owned() }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn auth(&self) -> String {
        format!("{}/auth", self.base)
    }

    #[must_use]
    pub fn edumfa_servers(&self) -> String {
        format!("{}/edumfaserver/", self.base)
    }

    #[must_use]
    pub fn edumfa_server(&self, identifier: &str) -> String {
        format!("{}/edumfaserver/{}", self.base, encode_segment(identifier))
    }

    #[must_use]
    pub fn edumfa_server_test(&self) -> String {
        format!("{}/edumfaserver/test_request", self.base)
    }

    #[must_use]
    pub fn machines(&self) -> String {
        format!("{}/machine/", self.base)
    }

    #[must_use]
    pub fn machine_tokens(&self) -> String {
        format!("{}/machine/token", self.base)
    }

    /// `/machine/token/{serial}/{application}/{mtid}`
    #[must_use]
    pub fn machine_token(&self, key: &MachineTokenKey) -> String {
        format!(
            "{}/machine/token/{}/{}/{}",
            self.base,
            encode_segment(&key.serial),
            encode_segment(&key.application),
            key.mtid
        )
    }

    #[must_use]
    pub fn machine_token_options(&self) -> String {
        format!("{}/machine/tokenoption", self.base)
    }

    #[must_use]
    pub fn applications(&self) -> String {
        format!("{}/application/", self.base)
    }

    #[must_use]
    pub fn client_types(&self) -> String {
        format!("{}/client/", self.base)
    }

    #[must_use]
    pub fn recover(&self) -> String {
        format!("{}/recover", self.base)
    }

    #[must_use]
    pub fn recover_reset(&self) -> String {
        format!("{}/recover/reset", self.base)
    }
}
