//! User roles
//!
//! Roles form a closed set; an invalid role string is rejected at the
//! request boundary and can never reach storage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role assigned to a user at sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May manage the catalog in addition to borrowing.
    Librarian,
    /// Capped at three simultaneous open borrows.
    Student,
    /// Uncapped borrower without catalog privileges.
    General,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Librarian => "librarian",
            Role::Student => "student",
            Role::General => "general",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "librarian" => Ok(Role::Librarian),
            "student" => Ok(Role::Student),
            "general" => Ok(Role::General),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

// Used by the sqlx row mapping (`#[sqlx(try_from = "String")]`).
impl TryFrom<String> for Role {
    type Error = RoleParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid role '{0}'. Must be 'librarian', 'student', or 'general'")]
pub struct RoleParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_valid_roles() {
        assert_eq!("librarian".parse::<Role>().unwrap(), Role::Librarian);
        assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
        assert_eq!("general".parse::<Role>().unwrap(), Role::General);
    }

    #[test]
    fn rejects_unknown_roles() {
        assert!("admin".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
        assert!("Librarian".parse::<Role>().is_err());
    }

    #[test]
    fn round_trips_through_display() {
        for role in [Role::Librarian, Role::Student, Role::General] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn serializes_as_lowercase_string() {
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"student\"");
        let role: Role = serde_json::from_str("\"librarian\"").unwrap();
        assert_eq!(role, Role::Librarian);
    }
}
