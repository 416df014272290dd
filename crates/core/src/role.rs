use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Administrative role of the authenticated user.
///
/// The set is closed: every consumer matches exhaustively, so adding a role is
/// a compile error everywhere a decision depends on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleTag {
    CollegeAdmin,
    DepartmentAdmin,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role tag '{0}'")]
pub struct UnknownRole(pub String);

impl RoleTag {
    pub const ALL: [RoleTag; 2] = [RoleTag::CollegeAdmin, RoleTag::DepartmentAdmin];

    /// Persisted/wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleTag::CollegeAdmin => "college_admin",
            RoleTag::DepartmentAdmin => "department_admin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoleTag::CollegeAdmin => "College Admin",
            RoleTag::DepartmentAdmin => "Department Admin",
        }
    }
}

impl core::fmt::Display for RoleTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleTag {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "college_admin" => Ok(RoleTag::CollegeAdmin),
            "department_admin" => Ok(RoleTag::DepartmentAdmin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_back_to_the_same_role() {
        for role in RoleTag::ALL {
            assert_eq!(role.as_str().parse::<RoleTag>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = "unknown-role".parse::<RoleTag>().unwrap_err();
        assert_eq!(err, UnknownRole("unknown-role".to_string()));
    }

    #[test]
    fn serde_uses_the_persisted_tag() {
        let json = serde_json::to_string(&RoleTag::DepartmentAdmin).unwrap();
        assert_eq!(json, "\"department_admin\"");
    }
}
