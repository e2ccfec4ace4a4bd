//! Roster repository
//!
//! The collaborators the TUI can open in the edit modal, cached in
//! `data/collaborateurs.json`. Records are kept in insertion order.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::StaffingError;
use crate::models::{CollaboratorRecord, Matricule};

use super::file_io::{read_json, write_json_atomic};

/// Serializable roster file
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct RosterData {
    collaborateurs: Vec<CollaboratorRecord>,
}

/// Repository for the roster cache
pub struct RosterRepository {
    path: PathBuf,
    data: RwLock<Vec<CollaboratorRecord>>,
}

impl RosterRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load the roster from disk
    pub fn load(&self) -> Result<(), StaffingError> {
        let file_data: RosterData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            StaffingError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        *data = file_data.collaborateurs;
        Ok(())
    }

    /// Save the roster to disk
    pub fn save(&self) -> Result<(), StaffingError> {
        let data = self.data.read().map_err(|e| {
            StaffingError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = RosterData {
            collaborateurs: data.clone(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get all records, most recently added last
    pub fn get_all(&self) -> Result<Vec<CollaboratorRecord>, StaffingError> {
        let data = self.data.read().map_err(|e| {
            StaffingError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.clone())
    }

    pub fn get(&self, matricule: &Matricule) -> Result<Option<CollaboratorRecord>, StaffingError> {
        let data = self.data.read().map_err(|e| {
            StaffingError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.iter().find(|r| &r.matricule == matricule).cloned())
    }

    /// Insert a record, or replace the one with the same matricule in place
    pub fn upsert(&self, record: CollaboratorRecord) -> Result<(), StaffingError> {
        let mut data = self.data.write().map_err(|e| {
            StaffingError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match data.iter_mut().find(|r| r.matricule == record.matricule) {
            Some(existing) => *existing = record,
            None => data.push(record),
        }
        Ok(())
    }

    pub fn count(&self) -> Result<usize, StaffingError> {
        let data = self.data.read().map_err(|e| {
            StaffingError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
