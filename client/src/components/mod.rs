//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Application chrome shared by every page: the navigation bar with the
//! global reload action and the toast outlet.

pub mod nav_bar;
pub mod toasts;
