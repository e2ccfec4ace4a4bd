//! Core data models for staffing-cli
//!
//! Identifiers, allocation rows, select options and collaborator records.

pub mod allocation;
pub mod collaborator;
pub mod ids;
pub mod numeric;

pub use allocation::{AllocationRow, AssignmentOption, Axis, ProfileOption};
pub use collaborator::CollaboratorRecord;
pub use ids::{AssignmentId, Matricule, ProfileId};
