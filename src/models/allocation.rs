//! Allocation models
//!
//! An allocation splits work between the Build and Run axes. Secondary
//! allocations are rows that hand part of the primary budget to another
//! profile.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AssignmentId, ProfileId};

/// The two work-type axes every allocation splits between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Build,
    Run,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Build, Axis::Run];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Build => "Build",
            Self::Run => "Run",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A secondary allocation as the server reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRow {
    pub profile_id: ProfileId,
    pub profile_name: String,
    pub build_percent: f64,
    pub run_percent: f64,
}

impl AllocationRow {
    pub fn new(
        profile_id: ProfileId,
        profile_name: impl Into<String>,
        build_percent: f64,
        run_percent: f64,
    ) -> Self {
        Self {
            profile_id,
            profile_name: profile_name.into(),
            build_percent,
            run_percent,
        }
    }

    pub fn percent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Build => self.build_percent,
            Axis::Run => self.run_percent,
        }
    }
}

/// A profile that can be picked in a select
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileOption {
    pub id: ProfileId,
    pub name: String,

    /// Default base hours for collaborators on this profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heures_base: Option<f64>,
}

impl ProfileOption {
    pub fn new(id: ProfileId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            heures_base: None,
        }
    }

    pub fn with_base_hours(mut self, hours: f64) -> Self {
        self.heures_base = Some(hours);
        self
    }
}

/// An assignment (organisational unit) that can be picked in a select
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentOption {
    pub id: AssignmentId,
    pub name: String,
}

impl AssignmentOption {
    pub fn new(id: AssignmentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
