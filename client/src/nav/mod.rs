//! Navigation states, URL resolution and default-child redirects.
//!
//! SYSTEM CONTEXT
//! ==============
//! `areas` declares the static state table per feature area, `registry`
//! turns it into an immutable lookup used by the router and by controllers
//! that navigate by state name. `navigator` is how controllers move the
//! router without depending on it.

pub mod areas;
pub mod navigator;
pub mod registry;

pub use areas::ControllerKind;
pub use navigator::{Navigator, SignalNavigator};
pub use registry::{NavError, NavigationState, Resolution, StateMatch, StateRegistry};
