//! View state for machines and their attached tokens.

use records::{ApplicationDefinitions, Machine, MachineToken};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MachineState {
    /// Resolver filter of the list view (`/machine/list?resolver=`).
    pub resolver: Option<String>,
    pub machines: Vec<Machine>,
    /// `(machineid, resolver)` shown by the details view.
    pub selected: Option<(String, String)>,
    pub tokens: Vec<MachineToken>,
    pub applications: ApplicationDefinitions,
    pub loading: bool,
}

impl MachineState {
    /// Application names offered when attaching a token.
    #[must_use]
    pub fn application_names(&self) -> Vec<String> {
        self.applications.keys().cloned().collect()
    }
}
