//! Storage initialization
//!
//! First-run setup: directories, the settings file and an empty roster.

use crate::config::paths::StaffingPaths;
use crate::config::settings::Settings;
use crate::error::StaffingError;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched.
pub fn initialize_storage(paths: &StaffingPaths) -> Result<(), StaffingError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    if !paths.roster_file().exists() {
        write_json_atomic(
            paths.roster_file(),
            &serde_json::json!({ "collaborateurs": [] }),
        )?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &StaffingPaths) -> bool {
    !paths.roster_file().exists() || !paths.settings_file().exists()
}
