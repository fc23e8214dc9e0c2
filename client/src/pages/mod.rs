//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page mirrors its controller's store into a signal, calls the
//! controller on mount and on user actions, and subscribes to the reload
//! broadcast for as long as it is mounted.

pub mod component;
pub mod edumfa_server;
pub mod home;
pub mod machine;
pub mod recovery;
pub mod redirect;
