//! The two user roles.
//!
//! Roles are a closed enumeration; every role-dependent decision is an
//! exhaustive `match`, so adding a role is a compile error at each site
//! that needs to think about it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    Teacher,
    #[default]
    Student,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// Role assigned at registration: anything other than exactly
    /// `"teacher"` or `"student"` (including absence) becomes `Student`.
    pub fn from_registration(requested: Option<&str>) -> Self {
        requested
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    /// Case-sensitive: `"Teacher"` is not a role.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_registration_accepts_exact_values() {
        assert_eq!(Role::from_registration(Some("teacher")), Role::Teacher);
        assert_eq!(Role::from_registration(Some("student")), Role::Student);
    }

    #[test]
    fn test_from_registration_defaults_to_student() {
        assert_eq!(Role::from_registration(None), Role::Student);
        assert_eq!(Role::from_registration(Some("admin")), Role::Student);
        assert_eq!(Role::from_registration(Some("Teacher")), Role::Student);
        assert_eq!(Role::from_registration(Some("")), Role::Student);
    }

    #[test]
    fn test_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"teacher\"");
        let role: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, Role::Student);
        assert!(serde_json::from_str::<Role>("\"admin\"").is_err());
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(Role::Teacher.to_string(), "teacher");
        assert_eq!(Role::Student.to_string(), Role::Student.as_str());
    }
}
