//! Roster display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::CollaboratorRecord;

#[derive(Tabled)]
struct RosterLine {
    #[tabled(rename = "Matricule")]
    matricule: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Profile")]
    profile: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Build %")]
    build: String,
    #[tabled(rename = "Run %")]
    run: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl RosterLine {
    fn from_record(record: &CollaboratorRecord, settings: &Settings) -> Self {
        let profile = match record.profil_id {
            Some(id) => settings
                .profile(id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| format!("Profile #{}", id)),
            None => "-".to_string(),
        };

        Self {
            matricule: record.matricule.to_string(),
            name: record.full_name(),
            profile,
            hours: format!("{:.2}", record.heures_base),
            build: format!("{:.2}", record.pourcentage_build),
            run: format!("{:.2}", record.pourcentage_run),
            updated: record
                .updated_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Format the roster as a table
pub fn format_roster(records: &[CollaboratorRecord], settings: &Settings) -> String {
    if records.is_empty() {
        return "No collaborators in the roster.\n".to_string();
    }

    let lines: Vec<RosterLine> = records
        .iter()
        .map(|r| RosterLine::from_record(r, settings))
        .collect();

    let mut table = Table::new(lines);
    table.with(Style::psql());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Matricule, ProfileId, ProfileOption};

    #[test]
    fn test_empty_roster() {
        let output = format_roster(&[], &Settings::default());
        assert!(output.contains("No collaborators"));
    }

    #[test]
    fn test_profile_names_resolved_from_settings() {
        let mut settings = Settings::default();
        settings
            .profiles
            .push(ProfileOption::new(ProfileId::new(1), "Developer"));

        let mut known = CollaboratorRecord::new(Matricule::new("M1"), "DURAND", "Alice");
        known.profil_id = Some(ProfileId::new(1));
        let mut unknown = CollaboratorRecord::new(Matricule::new("M2"), "PETIT", "Bob");
        unknown.profil_id = Some(ProfileId::new(9));

        let output = format_roster(&[known, unknown], &settings);
        assert!(output.contains("Matricule"));
        assert!(output.contains("Developer"));
        assert!(output.contains("Profile #9"));
        assert!(output.contains("DURAND Alice"));
    }
}
