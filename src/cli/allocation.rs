//! Allocation CLI commands
//!
//! Fetch a collaborator's secondary allocations from the server, or run the
//! budget check offline on numbers given on the command line.

use std::str::FromStr;

use crate::api::{AllocationBackend, HttpBackend};
use crate::config::Settings;
use crate::display::{format_budget_check, format_repartition_list};
use crate::error::{StaffingError, StaffingResult};
use crate::form::{check_budget, StagedRow};
use crate::models::{Matricule, ProfileId};

/// A `--row PID:BUILD:RUN` argument
#[derive(Debug, Clone, PartialEq)]
pub struct RowSpec {
    pub profile_id: ProfileId,
    pub build: String,
    pub run: String,
}

impl FromStr for RowSpec {
    type Err = StaffingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let [profile, build, run] = parts.as_slice() else {
            return Err(StaffingError::Validation(format!(
                "Invalid row '{}'. Use PROFILE_ID:BUILD:RUN, e.g. '3:20:10'",
                s
            )));
        };

        let profile_id = profile.parse::<ProfileId>().map_err(|_| {
            StaffingError::Validation(format!("Invalid profile id '{}' in row '{}'", profile, s))
        })?;

        Ok(Self {
            profile_id,
            build: build.to_string(),
            run: run.to_string(),
        })
    }
}

impl RowSpec {
    fn to_staged(&self, settings: &Settings) -> StagedRow {
        let name = settings
            .profile(self.profile_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("Profile #{}", self.profile_id));
        StagedRow::new(self.profile_id, name, self.build.as_str(), self.run.as_str())
    }
}

/// Print the secondary allocations the server holds for a collaborator
pub fn handle_repartitions_command(settings: &Settings, matricule: &str) -> StaffingResult<()> {
    let matricule = Matricule::new(matricule);
    if matricule.is_empty() {
        return Err(StaffingError::Validation("Matricule cannot be empty".into()));
    }

    let backend = HttpBackend::new(&settings.server)?;
    let rows = backend.fetch_repartitions(&matricule)?;

    println!("Secondary allocations for {}", matricule);
    println!();
    print!("{}", format_repartition_list(&rows));
    Ok(())
}

/// Run the pre-submit budget check without a form
///
/// Returns a validation error when the form would be blocked, so the
/// process exits non-zero.
pub fn handle_check_command(
    settings: &Settings,
    build: &str,
    run: &str,
    hours: &str,
    rows: &[RowSpec],
) -> StaffingResult<()> {
    let staged: Vec<StagedRow> = rows.iter().map(|r| r.to_staged(settings)).collect();

    let check = check_budget(build, run, hours, &staged).map_err(|errors| {
        let lines: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        StaffingError::Validation(lines.join("; "))
    })?;

    print!("{}", format_budget_check(&check));
    println!();
    println!("{}", check.summary());

    if check.is_within_budget() {
        println!();
        println!("Within budget: the form would be submitted.");
        Ok(())
    } else {
        let axes: Vec<&str> = check.exceeded_axes().iter().map(|a| a.label()).collect();
        Err(StaffingError::Validation(format!(
            "Secondary CAF exceeds the available CAF on {}",
            axes.join(" and ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_row_spec() {
        let spec: RowSpec = "3:20:10".parse().unwrap();
        assert_eq!(spec.profile_id, ProfileId::new(3));
        assert_eq!(spec.build, "20");
        assert_eq!(spec.run, "10");
    }

    #[test]
    fn test_parse_row_spec_keeps_decimal_comma() {
        let spec: RowSpec = "prf-4:12,5:0".parse().unwrap();
        assert_eq!(spec.profile_id, ProfileId::new(4));
        assert_eq!(spec.build, "12,5");
    }

    #[test]
    fn test_parse_row_spec_rejects_bad_shape() {
        assert!("3:20".parse::<RowSpec>().is_err());
        assert!("x:20:10".parse::<RowSpec>().is_err());
        assert!("1:2:3:4".parse::<RowSpec>().is_err());
    }

    #[test]
    fn test_check_within_budget() {
        let rows = vec!["1:50:50".parse().unwrap()];
        assert!(handle_check_command(&Settings::default(), "50", "20", "100", &rows).is_ok());
    }

    #[test]
    fn test_check_over_budget_is_error() {
        let rows = vec!["1:200:50".parse().unwrap()];
        let err =
            handle_check_command(&Settings::default(), "50", "20", "100", &rows).unwrap_err();
        assert!(matches!(err, StaffingError::Validation(_)));
        assert!(err.to_string().contains("Build"));
        assert!(!err.to_string().contains("Run"));
    }

    #[test]
    fn test_check_unreadable_number() {
        let err = handle_check_command(&Settings::default(), "abc", "20", "100", &[]).unwrap_err();
        assert!(matches!(err, StaffingError::Validation(_)));
    }
}
