//! Field errors and the pre-submit budget check
//!
//! The available budget (CAF) of an axis is `percent / 100 * base_hours`.
//! Each secondary row then takes `row_percent / 100 * available` of it, so a
//! row percentage is a share of the already scaled budget. The totals must
//! not exceed the available budget on either axis.

use std::fmt;

use crate::models::numeric::{parse_or_zero, NumericInputError};
use crate::models::Axis;

use super::rows::StagedRow;

/// A form control an error can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Matricule,
    Nom,
    Prenom,
    Profile,
    Assignment,
    BaseHours,
    PrimaryBuild,
    PrimaryRun,
    EntryProfile,
    EntryBuild,
    EntryRun,
    RowCell { index: usize, axis: Axis },
    /// The secondary allocation table as a whole
    Rows,
}

impl Field {
    pub fn label(&self) -> String {
        match self {
            Self::Matricule => "Matricule".into(),
            Self::Nom => "Last name".into(),
            Self::Prenom => "First name".into(),
            Self::Profile => "Profile".into(),
            Self::Assignment => "Assignment".into(),
            Self::BaseHours => "Base hours".into(),
            Self::PrimaryBuild => "Build %".into(),
            Self::PrimaryRun => "Run %".into(),
            Self::EntryProfile => "Secondary profile".into(),
            Self::EntryBuild => "Secondary Build %".into(),
            Self::EntryRun => "Secondary Run %".into(),
            Self::RowCell { index, axis } => format!("Row {} {} %", index + 1, axis),
            Self::Rows => "Secondary allocations".into(),
        }
    }
}

/// A problem with one form control
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: Field) -> Self {
        Self::new(field, "is required")
    }

    pub fn not_a_number(field: Field) -> Self {
        Self::new(field, "must be a number")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.label(), self.message)
    }
}

/// Read a numeric field, blank as zero, recording an error otherwise
pub(crate) fn read_number(input: &str, field: Field, errors: &mut Vec<FieldError>) -> f64 {
    match parse_or_zero(input) {
        Ok(v) => v,
        Err(NumericInputError::NotANumber) => {
            errors.push(FieldError::not_a_number(field));
            0.0
        }
    }
}

/// Available CAF of an axis
pub fn available_budget(percent: f64, base_hours: f64) -> f64 {
    (percent / 100.0) * base_hours
}

/// Budget and allocated total of one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBudget {
    pub axis: Axis,
    pub available: f64,
    pub allocated: f64,
}

impl AxisBudget {
    pub fn exceeded(&self) -> bool {
        self.allocated > self.available
    }
}

/// The CAF one secondary row takes from each axis
#[derive(Debug, Clone, PartialEq)]
pub struct RowContribution {
    pub profile_name: String,
    pub build: f64,
    pub run: f64,
}

/// Result of checking staged rows against the primary budget
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetCheck {
    pub build: AxisBudget,
    pub run: AxisBudget,
    pub rows: Vec<RowContribution>,
}

impl BudgetCheck {
    pub fn axis(&self, axis: Axis) -> &AxisBudget {
        match axis {
            Axis::Build => &self.build,
            Axis::Run => &self.run,
        }
    }

    pub fn is_within_budget(&self) -> bool {
        !self.build.exceeded() && !self.run.exceeded()
    }

    pub fn exceeded_axes(&self) -> Vec<Axis> {
        Axis::ALL
            .into_iter()
            .filter(|a| self.axis(*a).exceeded())
            .collect()
    }

    /// Both budgets and both totals, two decimals each
    pub fn summary(&self) -> String {
        format!(
            "Primary CAF: {:.2} (Build) / {:.2} (Run)\nSecondary CAF: {:.2} (Build) / {:.2} (Run)",
            self.build.available, self.run.available, self.build.allocated, self.run.allocated
        )
    }
}

/// Why a submission was stopped
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitBlock {
    /// Some controls are missing or unreadable
    Invalid(Vec<FieldError>),
    /// The secondary rows take more than the primary budget
    OverBudget(BudgetCheck),
}

/// Check staged rows against the primary percentages and base hours
///
/// Blank numeric inputs count as zero. Unreadable inputs are returned as
/// field errors and nothing is computed.
pub fn check_budget(
    primary_build: &str,
    primary_run: &str,
    base_hours: &str,
    rows: &[StagedRow],
) -> Result<BudgetCheck, Vec<FieldError>> {
    let mut errors = Vec::new();

    let p_build = read_number(primary_build, Field::PrimaryBuild, &mut errors);
    let p_run = read_number(primary_run, Field::PrimaryRun, &mut errors);
    let hours = read_number(base_hours, Field::BaseHours, &mut errors);

    let caf_build = available_budget(p_build, hours);
    let caf_run = available_budget(p_run, hours);

    let mut total_build = 0.0;
    let mut total_run = 0.0;
    let mut contributions = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let rb = read_number(
            &row.build,
            Field::RowCell {
                index,
                axis: Axis::Build,
            },
            &mut errors,
        );
        let rr = read_number(
            &row.run,
            Field::RowCell {
                index,
                axis: Axis::Run,
            },
            &mut errors,
        );

        let build = (rb / 100.0) * caf_build;
        let run = (rr / 100.0) * caf_run;
        total_build += build;
        total_run += run;

        contributions.push(RowContribution {
            profile_name: row.profile_name.clone(),
            build,
            run,
        });
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(BudgetCheck {
        build: AxisBudget {
            axis: Axis::Build,
            available: caf_build,
            allocated: total_build,
        },
        run: AxisBudget {
            axis: Axis::Run,
            available: caf_run,
            allocated: total_run,
        },
        rows: contributions,
    })
}
