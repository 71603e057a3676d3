//! Actor identity supplied by the identity collaborator
//!
//! The server never validates credentials itself; an upstream identity
//! service authenticates the caller and forwards `(id, name, role)` with
//! every request. The core trusts this identity and authorizes by role only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    KitchenStaff,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::KitchenStaff => write!(f, "kitchen_staff"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Role parse error
#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "kitchen_staff" => Ok(Role::KitchenStaff),
            "admin" => Ok(Role::Admin),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

/// Authenticated caller identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    /// Actor ID (user/staff ID from the identity service)
    pub id: String,
    /// Display name (snapshot for event payloads and audit)
    pub name: String,
    /// Role
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }

    /// Kitchen staff and admins count as staff
    pub fn is_staff(&self) -> bool {
        matches!(self.role, Role::KitchenStaff | Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Customer, Role::KitchenStaff, Role::Admin] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_staff_check() {
        assert!(!Actor::new("u1", "Ana", Role::Customer).is_staff());
        assert!(Actor::new("s1", "Ben", Role::KitchenStaff).is_staff());
        assert!(Actor::new("a1", "Cid", Role::Admin).is_staff());
        assert!(Actor::new("a1", "Cid", Role::Admin).is_admin());
    }
}
