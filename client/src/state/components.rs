//! View state for client components.

use records::ClientTypes;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComponentState {
    pub client_types: ClientTypes,
    pub loading: bool,
}
