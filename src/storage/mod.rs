//! Storage layer for staffing-cli
//!
//! Local JSON files with atomic writes and automatic directory creation.
//! The only persisted data is the roster cache.

pub mod file_io;
pub mod init;
pub mod roster;

pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use roster::RosterRepository;

use crate::config::paths::StaffingPaths;
use crate::error::StaffingError;

/// Main storage coordinator
pub struct Storage {
    pub roster: RosterRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: StaffingPaths) -> Result<Self, StaffingError> {
        paths.ensure_directories()?;

        Ok(Self {
            roster: RosterRepository::new(paths.roster_file()),
        })
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), StaffingError> {
        self.roster.load()
    }
}
