//! Declared navigation states for every feature area.
//!
//! Names are dotted: a state's parent is the name up to its last dot, and
//! its full URL is the parent's URL followed by its own pattern.

/// Controller a state's view is driven by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControllerKind {
    Component,
    MachineDetails,
    Recovery,
    EduMfaServer,
}

impl ControllerKind {
    /// Heading of the views this controller drives.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Component => "Components",
            Self::MachineDetails => "Machine details",
            Self::Recovery => "Password recovery",
            Self::EduMfaServer => "eduMFA servers",
        }
    }
}

/// Static declaration of one navigation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateDef {
    pub name: &'static str,
    /// Pattern relative to the parent: literals, `{param}` segments and an
    /// optional `?name&other` list of accepted query parameters.
    pub url: &'static str,
    /// Directory under `static/components/`.
    pub area: &'static str,
    /// Template file name without `.html`.
    pub view: &'static str,
    pub controller: Option<ControllerKind>,
}

pub const STATES: &[StateDef] = &[
    // components
    StateDef {
        name: "component",
        url: "/component",
        area: "components",
        view: "component",
        controller: Some(ControllerKind::Component),
    },
    StateDef {
        name: "component.clienttype",
        url: "/clienttype",
        area: "components",
        view: "component.clienttype",
        controller: Some(ControllerKind::Component),
    },
    // machines
    StateDef {
        name: "machine",
        url: "/machine",
        area: "machine",
        view: "machine",
        controller: None,
    },
    StateDef {
        name: "machine.list",
        url: "/list?resolver",
        area: "machine",
        view: "machine.list",
        controller: None,
    },
    StateDef {
        name: "machine.details",
        url: "/details/{machineid:.*}/{machineresolver:.*}",
        area: "machine",
        view: "machine.details",
        controller: Some(ControllerKind::MachineDetails),
    },
    // password recovery
    StateDef {
        name: "recovery",
        url: "/recovery",
        area: "recovery",
        view: "recovery",
        controller: Some(ControllerKind::Recovery),
    },
    StateDef {
        name: "reset",
        url: "/reset/{user:.*}/{recoverycode:.*}",
        area: "recovery",
        view: "recovery.reset",
        controller: Some(ControllerKind::Recovery),
    },
    // remote eduMFA servers
    StateDef {
        name: "config",
        url: "/config",
        area: "config",
        view: "config",
        controller: None,
    },
    StateDef {
        name: "config.edumfaserver",
        url: "/edumfaserver",
        area: "config",
        view: "config.edumfaserver",
        controller: Some(ControllerKind::EduMfaServer),
    },
    StateDef {
        name: "config.edumfaserver.list",
        url: "/list",
        area: "config",
        view: "config.edumfaserver.list",
        controller: Some(ControllerKind::EduMfaServer),
    },
    StateDef {
        name: "config.edumfaserver.new",
        url: "/new",
        area: "config",
        view: "config.edumfaserver.details",
        controller: Some(ControllerKind::EduMfaServer),
    },
    StateDef {
        name: "config.edumfaserver.edit",
        url: "/edit/{identifier:.*}",
        area: "config",
        view: "config.edumfaserver.details",
        controller: Some(ControllerKind::EduMfaServer),
    },
];

/// Parent state → the child it redirects to when visited directly.
pub const DEFAULT_CHILDREN: &[(&str, &str)] = &[
    ("component", "component.clienttype"),
    ("machine", "machine.list"),
    ("config", "config.edumfaserver"),
    ("config.edumfaserver", "config.edumfaserver.list"),
];
