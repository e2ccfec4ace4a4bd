//! User settings for staffing-cli
//!
//! Manages the server location, modal timings, the select options offered in
//! the allocation forms, and the log filter.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::StaffingPaths;
use crate::error::StaffingError;
use crate::models::{AssignmentOption, ProfileOption};

/// Where the allocation server lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Base URL, without trailing slash (e.g. "http://127.0.0.1:5000")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional request timeout; requests never time out when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

/// Durations of the modal transitions and the table error highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalTimings {
    #[serde(default = "default_open_delay_ms")]
    pub open_delay_ms: u64,

    #[serde(default = "default_close_delay_ms")]
    pub close_delay_ms: u64,

    #[serde(default = "default_highlight_ms")]
    pub highlight_ms: u64,
}

impl ModalTimings {
    pub fn open_delay(&self) -> Duration {
        Duration::from_millis(self.open_delay_ms)
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }

    pub fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }
}

impl Default for ModalTimings {
    fn default() -> Self {
        Self {
            open_delay_ms: default_open_delay_ms(),
            close_delay_ms: default_close_delay_ms(),
            highlight_ms: default_highlight_ms(),
        }
    }
}

/// User settings for staffing-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub timings: ModalTimings,

    /// Profiles offered in the primary and secondary profile selects
    #[serde(default)]
    pub profiles: Vec<ProfileOption>,

    /// Assignments offered in the assignment select
    #[serde(default)]
    pub assignments: Vec<AssignmentOption>,

    /// Default tracing filter, overridden by RUST_LOG
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_open_delay_ms() -> u64 {
    50
}

fn default_close_delay_ms() -> u64 {
    150
}

fn default_highlight_ms() -> u64 {
    2000
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            server: ServerSettings::default(),
            timings: ModalTimings::default(),
            profiles: Vec::new(),
            assignments: Vec::new(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &StaffingPaths) -> Result<Self, StaffingError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                StaffingError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                StaffingError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &StaffingPaths) -> Result<(), StaffingError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            StaffingError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            StaffingError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Look up a profile option by id
    pub fn profile(&self, id: crate::models::ProfileId) -> Option<&ProfileOption> {
        self.profiles.iter().find(|p| p.id == id)
    }
}
