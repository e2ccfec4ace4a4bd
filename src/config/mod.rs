//! Configuration module for staffing-cli
//!
//! This module provides configuration management including:
//! - Path resolution (with an environment override)
//! - User settings persistence (server, timings, select options)

pub mod paths;
pub mod settings;

pub use paths::StaffingPaths;
pub use settings::{ModalTimings, ServerSettings, Settings};
