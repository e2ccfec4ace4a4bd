//! Secondary allocation row editor
//!
//! Each form owns a `RowEditor`: the entry controls (profile, Build %, Run %)
//! and the table of staged rows. The table is an ordered list; what the user
//! sees is produced by `RowTable::views`, which depends on nothing but the
//! list.

use std::time::{Duration, Instant};

use crate::models::numeric::{format_input, parse_optional};
use crate::models::{AllocationRow, Axis, ProfileId, ProfileOption};

use super::validation::{Field, FieldError};

/// Text of the informational row shown when a collaborator has no rows
pub const PLACEHOLDER_TEXT: &str = "No secondary allocation";

/// A row waiting in the table until the form is submitted
///
/// The two percentages are editable cells and keep the typed text.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedRow {
    pub profile_id: ProfileId,
    pub profile_name: String,
    pub build: String,
    pub run: String,
}

impl StagedRow {
    pub fn new(
        profile_id: ProfileId,
        profile_name: impl Into<String>,
        build: impl Into<String>,
        run: impl Into<String>,
    ) -> Self {
        Self {
            profile_id,
            profile_name: profile_name.into(),
            build: build.into(),
            run: run.into(),
        }
    }

    pub fn cell(&self, axis: Axis) -> &str {
        match axis {
            Axis::Build => &self.build,
            Axis::Run => &self.run,
        }
    }

    pub fn cell_mut(&mut self, axis: Axis) -> &mut String {
        match axis {
            Axis::Build => &mut self.build,
            Axis::Run => &mut self.run,
        }
    }
}

impl From<&AllocationRow> for StagedRow {
    fn from(row: &AllocationRow) -> Self {
        Self::new(
            row.profile_id,
            row.profile_name.clone(),
            format_input(row.build_percent),
            format_input(row.run_percent),
        )
    }
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq)]
pub enum RowView {
    /// Informational row with no controls
    Placeholder { text: &'static str },
    /// A staged allocation: hidden profile id, label, two numeric inputs
    Data {
        hidden_profile_id: String,
        label: String,
        build_value: String,
        run_value: String,
    },
}

impl RowView {
    pub fn has_editable_fields(&self) -> bool {
        matches!(self, Self::Data { .. })
    }
}

/// The staged rows of one form
#[derive(Debug, Clone, Default)]
pub struct RowTable {
    rows: Vec<StagedRow>,
    placeholder: bool,
    highlight_until: Option<Instant>,
}

impl RowTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[StagedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn shows_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Append a row, dropping the placeholder first
    pub fn push(&mut self, row: StagedRow) {
        self.placeholder = false;
        self.rows.push(row);
    }

    /// Detach one row; its siblings are untouched
    pub fn remove(&mut self, index: usize) -> Option<StagedRow> {
        if index < self.rows.len() {
            Some(self.rows.remove(index))
        } else {
            None
        }
    }

    /// Replace the contents with rows fetched from the server
    ///
    /// An empty list leaves only the placeholder.
    pub fn replace_with(&mut self, rows: &[AllocationRow]) {
        self.rows = rows.iter().map(StagedRow::from).collect();
        self.placeholder = self.rows.is_empty();
    }

    /// Discard everything, including any highlight
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn cell_mut(&mut self, index: usize, axis: Axis) -> Option<&mut String> {
        self.rows.get_mut(index).map(|r| r.cell_mut(axis))
    }

    /// Render the table
    pub fn views(&self) -> Vec<RowView> {
        if self.placeholder {
            return vec![RowView::Placeholder {
                text: PLACEHOLDER_TEXT,
            }];
        }

        self.rows
            .iter()
            .map(|row| RowView::Data {
                hidden_profile_id: row.profile_id.to_string(),
                label: row.profile_name.clone(),
                build_value: row.build.clone(),
                run_value: row.run.clone(),
            })
            .collect()
    }

    /// Put the table in its error style for `duration`
    pub fn flag_error(&mut self, now: Instant, duration: Duration) {
        self.highlight_until = Some(now + duration);
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight_until.is_some()
    }

    /// Clear an expired highlight; returns true if it was cleared
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.highlight_until {
            Some(until) if now >= until => {
                self.highlight_until = None;
                true
            }
            _ => false,
        }
    }
}

/// The controls used to stage a new row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowEntry {
    pub profile: Option<ProfileOption>,
    pub build: String,
    pub run: String,
}

impl RowEntry {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check the entry and turn it into a row
    pub fn validate(&self) -> Result<StagedRow, Vec<FieldError>> {
        let build = self.build.trim();
        let run = self.run.trim();

        let mut errors = Vec::new();
        if self.profile.is_none() {
            errors.push(FieldError::required(Field::EntryProfile));
        }
        if build.is_empty() {
            errors.push(FieldError::required(Field::EntryBuild));
        }
        if run.is_empty() {
            errors.push(FieldError::required(Field::EntryRun));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let b = parse_optional(build).map_err(|_| FieldError::not_a_number(Field::EntryBuild));
        let r = parse_optional(run).map_err(|_| FieldError::not_a_number(Field::EntryRun));
        let (b, r) = match (b, r) {
            (Ok(Some(b)), Ok(Some(r))) => (b, r),
            (b, r) => {
                return Err(b.err().into_iter().chain(r.err()).collect());
            }
        };

        if b + r > 100.0 {
            return Err(vec![FieldError::new(
                Field::EntryRun,
                "plus Build % must not exceed 100%",
            )]);
        }

        let profile = self
            .profile
            .as_ref()
            .ok_or_else(|| vec![FieldError::required(Field::EntryProfile)])?;

        Ok(StagedRow::new(profile.id, profile.name.clone(), build, run))
    }
}

/// Entry controls plus staged rows
#[derive(Debug, Clone, Default)]
pub struct RowEditor {
    pub entry: RowEntry,
    pub table: RowTable,
}

impl RowEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage the entry as a new row and clear the entry controls
    ///
    /// On rejection nothing changes.
    pub fn add_row(&mut self) -> Result<(), Vec<FieldError>> {
        let row = self.entry.validate()?;
        self.table.push(row);
        self.entry.clear();
        Ok(())
    }

    pub fn remove_row(&mut self, index: usize) -> Option<StagedRow> {
        self.table.remove(index)
    }

    pub fn reset(&mut self) {
        self.entry.clear();
        self.table.clear();
    }
}
