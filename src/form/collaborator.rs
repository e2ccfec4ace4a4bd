//! Collaborator form state
//!
//! The add and edit modals share this view-model. Every control the page
//! used to look up by element id is a field here.

use crate::models::{
    AssignmentId, CollaboratorRecord, Matricule, ProfileId, ProfileOption,
};
use crate::models::numeric::{format_input, parse_optional};

use super::rows::RowEditor;
use super::validation::{check_budget, read_number, BudgetCheck, Field, FieldError, SubmitBlock};

/// Which modal a form belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Add,
    Edit,
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Add => "New Collaborator",
            Self::Edit => "Edit Collaborator",
        }
    }
}

/// Where a submission is posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    /// `POST /collaborateurs/ajouter`
    Add,
    /// `POST /collaborateurs/modifier/{matricule}`
    Edit(Matricule),
}

impl SubmitTarget {
    /// URL path segments below the server base
    pub fn segments(&self) -> Vec<String> {
        match self {
            Self::Add => vec!["collaborateurs".into(), "ajouter".into()],
            Self::Edit(m) => vec![
                "collaborateurs".into(),
                "modifier".into(),
                m.as_str().to_string(),
            ],
        }
    }

    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }
}

/// A validated form, ready to post
#[derive(Debug, Clone, PartialEq)]
pub struct FormSubmission {
    pub target: SubmitTarget,
    /// Form-encoded fields in document order, repeated keys included
    pub fields: Vec<(String, String)>,
    pub budget: BudgetCheck,
    /// The primary allocation as submitted, for the local roster
    pub record: CollaboratorRecord,
}

impl FormSubmission {
    /// All values posted under `name`
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// View-model of one collaborator modal
#[derive(Debug, Clone)]
pub struct CollaboratorForm {
    pub kind: FormKind,
    pub matricule: String,
    pub nom: String,
    pub prenom: String,
    pub profile: Option<ProfileId>,
    pub assignment: Option<AssignmentId>,
    pub base_hours: String,
    pub build: String,
    pub run: String,
    pub secondary: RowEditor,
    /// Errors from the last rejected action, shown inline
    pub errors: Vec<FieldError>,
    /// Result of the last budget check
    pub budget: Option<BudgetCheck>,
}

impl CollaboratorForm {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            matricule: String::new(),
            nom: String::new(),
            prenom: String::new(),
            profile: None,
            assignment: None,
            base_hours: String::new(),
            build: String::new(),
            run: String::new(),
            secondary: RowEditor::new(),
            errors: Vec::new(),
            budget: None,
        }
    }

    /// Discard everything typed or staged
    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }

    /// Fill the primary fields from a roster record
    pub fn populate(&mut self, record: &CollaboratorRecord) {
        self.reset();
        self.matricule = record.matricule.to_string();
        self.nom = record.nom.clone();
        self.prenom = record.prenom.clone();
        self.profile = record.profil_id;
        self.assignment = record.affectation_id;
        self.base_hours = format_input(record.heures_base);
        self.build = format_input(record.pourcentage_build);
        self.run = format_input(record.pourcentage_run);
    }

    /// Pick the primary profile, pre-filling blank base hours from it
    pub fn select_profile(&mut self, option: &ProfileOption) {
        self.profile = Some(option.id);
        if self.base_hours.trim().is_empty() {
            if let Some(hours) = option.heures_base {
                self.base_hours = format_input(hours);
            }
        }
    }

    pub fn set_errors(&mut self, errors: Vec<FieldError>) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Stage the secondary entry as a row, keeping errors inline
    pub fn add_secondary_row(&mut self) -> bool {
        match self.secondary.add_row() {
            Ok(()) => {
                self.clear_errors();
                true
            }
            Err(errors) => {
                self.set_errors(errors);
                false
            }
        }
    }

    fn target(&self) -> SubmitTarget {
        match self.kind {
            FormKind::Add => SubmitTarget::Add,
            FormKind::Edit => SubmitTarget::Edit(Matricule::new(self.matricule.as_str())),
        }
    }

    fn required_fields(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.matricule.trim().is_empty() {
            errors.push(FieldError::required(Field::Matricule));
        }
        if self.nom.trim().is_empty() {
            errors.push(FieldError::required(Field::Nom));
        }
        if self.prenom.trim().is_empty() {
            errors.push(FieldError::required(Field::Prenom));
        }
        if self.profile.is_none() {
            errors.push(FieldError::required(Field::Profile));
        }
        if self.assignment.is_none() {
            errors.push(FieldError::required(Field::Assignment));
        }
        errors
    }

    /// Run the pre-submit checks and build the request
    pub fn prepare_submission(&self) -> Result<FormSubmission, SubmitBlock> {
        let mut errors = self.required_fields();

        let budget = match check_budget(
            &self.build,
            &self.run,
            &self.base_hours,
            self.secondary.table.rows(),
        ) {
            Ok(check) => Some(check),
            Err(mut numeric) => {
                errors.append(&mut numeric);
                None
            }
        };

        let budget = match budget {
            Some(check) if errors.is_empty() => check,
            _ => return Err(SubmitBlock::Invalid(errors)),
        };

        if !budget.is_within_budget() {
            return Err(SubmitBlock::OverBudget(budget));
        }

        Ok(FormSubmission {
            target: self.target(),
            fields: self.encode(),
            record: self.to_record(),
            budget,
        })
    }

    /// Form-encoded fields, the way the page's form serializes
    pub fn encode(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        let mut push = |k: &str, v: String| fields.push((k.to_string(), v));

        if self.kind == FormKind::Add {
            push("matricule", self.matricule.trim().to_string());
        }
        push("nom", self.nom.trim().to_string());
        push("prenom", self.prenom.trim().to_string());
        push(
            "profil_id",
            self.profile.map(|p| p.to_string()).unwrap_or_default(),
        );
        push(
            "affectation_id",
            self.assignment.map(|a| a.to_string()).unwrap_or_default(),
        );
        push("heures_base", posted_number(&self.base_hours));
        push("pourcentage_build", posted_number(&self.build));
        push("pourcentage_run", posted_number(&self.run));

        for row in self.secondary.table.rows() {
            push("rep_profil_id[]", row.profile_id.to_string());
            push("rep_build[]", posted_number(&row.build));
            push("rep_run[]", posted_number(&row.run));
        }

        fields
    }

    /// The primary allocation as a roster record
    pub fn to_record(&self) -> CollaboratorRecord {
        let mut ignored = Vec::new();
        let mut record = CollaboratorRecord::new(
            Matricule::new(self.matricule.as_str()),
            self.nom.trim(),
            self.prenom.trim(),
        );
        record.profil_id = self.profile;
        record.affectation_id = self.assignment;
        record.heures_base = read_number(&self.base_hours, Field::BaseHours, &mut ignored);
        record.pourcentage_build = read_number(&self.build, Field::PrimaryBuild, &mut ignored);
        record.pourcentage_run = read_number(&self.run, Field::PrimaryRun, &mut ignored);
        record
    }
}

/// A numeric input as the server reads it: "12,5" goes out as "12.5"
fn posted_number(input: &str) -> String {
    match parse_optional(input) {
        Ok(Some(value)) => format_input(value),
        _ => input.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::rows::{RowEntry, StagedRow};

    fn filled(kind: FormKind) -> CollaboratorForm {
        let mut form = CollaboratorForm::new(kind);
        form.matricule = "M001".into();
        form.nom = "DUPONT".into();
        form.prenom = "Jeanne".into();
        form.profile = Some(ProfileId::new(2));
        form.assignment = Some(AssignmentId::new(5));
        form.base_hours = "100".into();
        form.build = "50".into();
        form.run = "20".into();
        form
    }

    #[test]
    fn test_populate_from_record() {
        let mut record = CollaboratorRecord::new(Matricule::new("M9"), "MARTIN", "Paul");
        record.profil_id = Some(ProfileId::new(1));
        record.affectation_id = Some(AssignmentId::new(3));
        record.heures_base = 1600.0;
        record.pourcentage_build = 70.0;
        record.pourcentage_run = 30.0;

        let mut form = CollaboratorForm::new(FormKind::Edit);
        form.secondary.table.push(StagedRow::new(ProfileId::new(1), "old", "1", "1"));
        form.populate(&record);

        assert_eq!(form.matricule, "M9");
        assert_eq!(form.base_hours, "1600");
        assert_eq!(form.build, "70");
        assert_eq!(form.profile, Some(ProfileId::new(1)));
        assert!(form.secondary.table.is_empty());
    }

    #[test]
    fn test_select_profile_prefills_blank_hours() {
        let option = ProfileOption::new(ProfileId::new(4), "Architect").with_base_hours(1500.0);
        let mut form = CollaboratorForm::new(FormKind::Add);
        form.select_profile(&option);
        assert_eq!(form.base_hours, "1500");

        form.base_hours = "1200".into();
        form.select_profile(&option);
        assert_eq!(form.base_hours, "1200");
    }

    #[test]
    fn test_edit_submission_targets_matricule() {
        let mut form = filled(FormKind::Edit);
        form.secondary.table.push(StagedRow::new(ProfileId::new(7), "QA", "40", "10"));
        form.secondary.table.push(StagedRow::new(ProfileId::new(8), "Ops", "20", "30"));

        let submission = form.prepare_submission().unwrap();
        assert_eq!(submission.target.path(), "/collaborateurs/modifier/M001");
        assert!(submission.values("matricule").is_empty());
        assert_eq!(submission.values("rep_profil_id[]"), vec!["7", "8"]);
        assert_eq!(submission.values("rep_build[]"), vec!["40", "20"]);
        assert_eq!(submission.values("rep_run[]"), vec!["10", "30"]);
        assert_eq!(submission.values("heures_base"), vec!["100"]);
        assert_eq!(submission.record.pourcentage_build, 50.0);
    }

    #[test]
    fn test_add_submission_includes_matricule() {
        let form = filled(FormKind::Add);
        let submission = form.prepare_submission().unwrap();
        assert_eq!(submission.target, SubmitTarget::Add);
        assert_eq!(submission.target.path(), "/collaborateurs/ajouter");
        assert_eq!(submission.values("matricule"), vec!["M001"]);
    }

    #[test]
    fn test_decimal_comma_is_posted_as_the_checked_number() {
        let mut form = filled(FormKind::Edit);
        form.base_hours = " 1600 ".into();
        form.build = "12,5".into();
        form.secondary.table.push(StagedRow::new(ProfileId::new(7), "QA", "10,5", "0,25"));

        let submission = form.prepare_submission().unwrap();
        assert_eq!(submission.budget.build.available, 200.0);
        assert_eq!(submission.values("pourcentage_build"), vec!["12.5"]);
        assert_eq!(submission.values("heures_base"), vec!["1600"]);
        assert_eq!(submission.values("rep_build[]"), vec!["10.5"]);
        assert_eq!(submission.values("rep_run[]"), vec!["0.25"]);
        assert_eq!(submission.record.pourcentage_build, 12.5);
    }

    #[test]
    fn test_over_budget_blocks() {
        let mut form = filled(FormKind::Edit);
        form.secondary.table.push(StagedRow::new(ProfileId::new(7), "QA", "200", "50"));

        match form.prepare_submission() {
            Err(SubmitBlock::OverBudget(check)) => {
                assert_eq!(check.build.allocated, 100.0);
                assert_eq!(check.run.allocated, 10.0);
            }
            other => panic!("expected over budget, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_identity_blocks() {
        let mut form = filled(FormKind::Add);
        form.nom.clear();
        form.assignment = None;

        match form.prepare_submission() {
            Err(SubmitBlock::Invalid(errors)) => {
                let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
                assert_eq!(fields, vec![Field::Nom, Field::Assignment]);
            }
            other => panic!("expected invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_add_secondary_row_keeps_errors_inline() {
        let mut form = filled(FormKind::Add);
        form.secondary.entry = RowEntry {
            profile: None,
            build: "10".into(),
            run: "10".into(),
        };
        assert!(!form.add_secondary_row());
        assert!(form.error_for(Field::EntryProfile).is_some());

        form.secondary.entry.profile = Some(ProfileOption::new(ProfileId::new(1), "A"));
        assert!(form.add_secondary_row());
        assert!(form.errors.is_empty());
    }
}
