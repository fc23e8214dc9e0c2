//! Networking modules for the eduMFA REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` is the HTTP seam (browser `fetch` or an in-memory double) and
//! `api` maps each backend operation onto it.

pub mod api;
#[cfg(test)]
pub(crate) mod mock;
pub mod transport;
