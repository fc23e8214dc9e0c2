//! Application state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plain state structs held in `Store`s. Controllers write them, pages mirror
//! them into signals, and nothing here touches the network.

pub mod auth;
pub mod components;
pub mod machines;
pub mod notify;
pub mod recovery;
pub mod servers;
pub mod store;
