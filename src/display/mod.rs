//! Display formatting for terminal output
//!
//! Formats allocation tables, budget check results and the roster for the
//! CLI commands.

pub mod allocation;
pub mod roster;

pub use allocation::{format_budget_check, format_repartition_list};
pub use roster::format_roster;
