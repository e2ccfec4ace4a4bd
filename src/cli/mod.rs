//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the form and server layers.

pub mod allocation;
pub mod roster;

pub use allocation::{handle_check_command, handle_repartitions_command, RowSpec};
pub use roster::handle_roster_command;
