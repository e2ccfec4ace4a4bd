//! Path management for staffing-cli
//!
//! ## Path Resolution Order
//!
//! 1. `STAFFING_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory for `staffing-cli`
//!    (`~/.config/staffing-cli` on Linux, `%APPDATA%\staffing-cli` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::StaffingError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "STAFFING_CLI_DATA_DIR";

/// Manages all paths used by staffing-cli
#[derive(Debug, Clone)]
pub struct StaffingPaths {
    /// Base directory for all staffing-cli data
    base_dir: PathBuf,
}

impl StaffingPaths {
    /// Create a new StaffingPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, StaffingError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create StaffingPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (roster cache)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the log directory
    pub fn log_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the roster cache
    pub fn roster_file(&self) -> PathBuf {
        self.data_dir().join("collaborateurs.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), StaffingError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| StaffingError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| StaffingError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.log_dir())
            .map_err(|e| StaffingError::Io(format!("Failed to create log directory: {}", e)))?;

        Ok(())
    }

    /// Check if staffing-cli has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, StaffingError> {
    ProjectDirs::from("", "", "staffing-cli")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| StaffingError::Config("Could not determine home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StaffingPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.log_dir(), temp_dir.path().join("logs"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StaffingPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.log_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StaffingPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.roster_file(),
            temp_dir.path().join("data").join("collaborateurs.json")
        );
    }
}
