//! Strongly-typed ID wrappers
//!
//! Profiles and assignments are keyed by the server's integer ids;
//! collaborators by their matricule. Newtypes keep them from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to generate integer ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Get the raw server id
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(ProfileId, "prf-");
define_id!(AssignmentId, "aff-");

/// A collaborator's employee identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matricule(String);

impl Matricule {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Matricule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Matricule {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(ProfileId::new(7).to_string(), "7");
        assert_eq!(AssignmentId::new(12).to_string(), "12");
    }

    #[test]
    fn test_id_parse() {
        assert_eq!("42".parse::<ProfileId>().unwrap(), ProfileId::new(42));
        assert_eq!(" prf-5 ".parse::<ProfileId>().unwrap(), ProfileId::new(5));
        assert!("abc".parse::<AssignmentId>().is_err());
    }

    #[test]
    fn test_id_serialization() {
        let json = serde_json::to_string(&ProfileId::new(9)).unwrap();
        assert_eq!(json, "9");
        let back: ProfileId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ProfileId::new(9));
    }

    #[test]
    fn test_matricule_trims() {
        let m = Matricule::new("  M001 ");
        assert_eq!(m.as_str(), "M001");
        assert!(Matricule::new("   ").is_empty());
    }
}
