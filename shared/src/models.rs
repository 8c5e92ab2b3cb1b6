//! Data models for the SyncFlow application

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account-level role
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Member,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Member => write!(f, "member"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(UserRole::Member),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("Unknown user role: {}", other)),
        }
    }
}

/// Role of a user within a workspace
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceRole {
    Admin,
    #[default]
    Member,
}

impl fmt::Display for WorkspaceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceRole::Admin => write!(f, "admin"),
            WorkspaceRole::Member => write!(f, "member"),
        }
    }
}

impl FromStr for WorkspaceRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(WorkspaceRole::Admin),
            "member" => Ok(WorkspaceRole::Member),
            other => Err(format!("Unknown workspace role: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_round_trip() {
        for role in [UserRole::Member, UserRole::Admin] {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_workspace_role_round_trip() {
        for role in [WorkspaceRole::Admin, WorkspaceRole::Member] {
            assert_eq!(role.to_string().parse::<WorkspaceRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_default_roles() {
        assert_eq!(UserRole::default(), UserRole::Member);
        assert_eq!(WorkspaceRole::default(), WorkspaceRole::Member);
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!("owner".parse::<UserRole>().is_err());
        assert!("".parse::<WorkspaceRole>().is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::from_str::<WorkspaceRole>("\"member\"").unwrap(),
            WorkspaceRole::Member
        );
    }
}
