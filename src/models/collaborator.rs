//! Collaborator record
//!
//! The primary allocation of one collaborator, as listed in the roster. The
//! edit modal is opened from one of these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AssignmentId, Matricule, ProfileId};

/// A collaborator and their primary allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaboratorRecord {
    pub matricule: Matricule,
    pub nom: String,
    pub prenom: String,

    #[serde(default)]
    pub profil_id: Option<ProfileId>,

    #[serde(default)]
    pub affectation_id: Option<AssignmentId>,

    #[serde(default)]
    pub pourcentage_build: f64,

    #[serde(default)]
    pub pourcentage_run: f64,

    #[serde(default)]
    pub heures_base: f64,

    /// When this record was last submitted from this machine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CollaboratorRecord {
    pub fn new(matricule: Matricule, nom: impl Into<String>, prenom: impl Into<String>) -> Self {
        Self {
            matricule,
            nom: nom.into(),
            prenom: prenom.into(),
            profil_id: None,
            affectation_id: None,
            pourcentage_build: 0.0,
            pourcentage_run: 0.0,
            heures_base: 0.0,
            updated_at: None,
        }
    }

    /// "NOM Prénom"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nom, self.prenom).trim().to_string()
    }

    /// Whether the primary allocation is missing its profile or assignment
    pub fn is_incomplete(&self) -> bool {
        self.profil_id.is_none() || self.affectation_id.is_none()
    }

    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

impl fmt::Display for CollaboratorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name(), self.matricule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_full_name() {
        let record = CollaboratorRecord::new(Matricule::new("M001"), "DUPONT", "Jeanne");
        assert_eq!(record.full_name(), "DUPONT Jeanne");
        assert_eq!(record.to_string(), "DUPONT Jeanne (M001)");
    }

    #[test]
    fn test_incomplete() {
        let mut record = CollaboratorRecord::new(Matricule::new("M001"), "A", "B");
        assert!(record.is_incomplete());
        record.profil_id = Some(ProfileId::new(1));
        record.affectation_id = Some(AssignmentId::new(2));
        assert!(!record.is_incomplete());
    }

    #[test]
    fn test_deserialize_minimal() {
        let record: CollaboratorRecord =
            serde_json::from_str(r#"{"matricule": "M7", "nom": "X", "prenom": "Y"}"#).unwrap();
        assert_eq!(record.matricule.as_str(), "M7");
        assert_eq!(record.heures_base, 0.0);
        assert!(record.updated_at.is_none());
    }
}
