//! Dialog modules for the TUI
//!
//! The collaborator add/edit modal and the help overlay

pub mod collaborator;
pub mod help;
