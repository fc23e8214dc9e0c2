//! View state for remote eduMFA server definitions.

use records::{EduMfaServerMap, EduMfaServerParams};

/// List and edit form shared by the list, new and edit views.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EduMfaServerState {
    /// Last list the server returned, keyed by identifier.
    pub servers: EduMfaServerMap,
    /// Edit form. New definitions start with `tls = true`.
    pub params: EduMfaServerParams,
    /// Identifier of the definition being edited, `None` for a new one.
    pub editing: Option<String>,
    /// A list request is in flight.
    pub loading: bool,
    /// `servers` was fetched by a save and the next list view may use it as is.
    pub fresh: bool,
}

impl EduMfaServerState {
    #[must_use]
    pub fn identifiers(&self) -> Vec<String> {
        self.servers.keys().cloned().collect()
    }
}
