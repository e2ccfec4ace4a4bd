//! Wire schema of the allocation read endpoint
//!
//! `GET /collaborateurs/repartition/get/{matricule}` answers
//! `{"repartitions": [{"profil_id", "profil_nom", "pourcentage_build",
//! "pourcentage_run", ...}]}`. The list may be empty, null or absent.

use serde::{Deserialize, Serialize};

use crate::error::{StaffingError, StaffingResult};
use crate::models::{AllocationRow, ProfileId};

/// One secondary allocation on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepartitionDto {
    pub profil_id: ProfileId,

    /// Null when the profile was deleted on the server
    #[serde(default)]
    pub profil_nom: Option<String>,

    pub pourcentage_build: f64,
    pub pourcentage_run: f64,
}

impl From<RepartitionDto> for AllocationRow {
    fn from(dto: RepartitionDto) -> Self {
        let name = dto
            .profil_nom
            .unwrap_or_else(|| format!("Profile #{}", dto.profil_id));
        AllocationRow::new(dto.profil_id, name, dto.pourcentage_build, dto.pourcentage_run)
    }
}

/// Body of the read endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepartitionResponse {
    #[serde(default)]
    pub repartitions: Option<Vec<RepartitionDto>>,
}

impl RepartitionResponse {
    pub fn into_rows(self) -> Vec<AllocationRow> {
        self.repartitions
            .unwrap_or_default()
            .into_iter()
            .map(AllocationRow::from)
            .collect()
    }
}

/// Parse a response body into rows, in server order
pub fn parse_repartitions(body: &str) -> StaffingResult<Vec<AllocationRow>> {
    let response: RepartitionResponse = serde_json::from_str(body)
        .map_err(|e| StaffingError::Schema(format!("repartitions response: {}", e)))?;
    Ok(response.into_rows())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_in_order() {
        let body = r#"{"repartitions": [
            {"id": 11, "profil_id": 1, "profil_nom": "A", "pourcentage_build": 10, "pourcentage_run": 5,
             "caf_disponible_build": 80.0, "caf_disponible_run": 16.0},
            {"id": 12, "profil_id": 2, "profil_nom": "B", "pourcentage_build": 12.5, "pourcentage_run": 0}
        ]}"#;

        let rows = parse_repartitions(body).unwrap();
        assert_eq!(
            rows,
            vec![
                AllocationRow::new(ProfileId::new(1), "A", 10.0, 5.0),
                AllocationRow::new(ProfileId::new(2), "B", 12.5, 0.0),
            ]
        );
    }

    #[test]
    fn test_empty_null_and_absent_lists() {
        assert!(parse_repartitions(r#"{"repartitions": []}"#).unwrap().is_empty());
        assert!(parse_repartitions(r#"{"repartitions": null}"#).unwrap().is_empty());
        assert!(parse_repartitions("{}").unwrap().is_empty());
    }

    #[test]
    fn test_null_profile_name() {
        let rows = parse_repartitions(
            r#"{"repartitions": [{"profil_id": 8, "profil_nom": null, "pourcentage_build": 1, "pourcentage_run": 2}]}"#,
        )
        .unwrap();
        assert_eq!(rows[0].profile_name, "Profile #8");
    }

    #[test]
    fn test_shape_mismatch_is_schema_error() {
        let err = parse_repartitions(r#"{"repartitions": [{"profil_id": "x"}]}"#).unwrap_err();
        assert!(matches!(err, StaffingError::Schema(_)));

        let err = parse_repartitions("<html>login</html>").unwrap_err();
        assert!(matches!(err, StaffingError::Schema(_)));

        let err = parse_repartitions(r#"{"repartitions": 3}"#).unwrap_err();
        assert!(matches!(err, StaffingError::Schema(_)));
    }
}
