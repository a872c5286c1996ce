//! User Role Value Object
//!
//! Access level attached to every account and carried in its bearer token.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Consultant,
    #[default]
    Student,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Consultant, UserRole::Student];

    /// Stable code used in storage and on the wire
    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Admin => "Admin",
            Consultant => "Consultant",
            Student => "Student",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Roles a visitor may pick for themselves at registration
    #[inline]
    pub const fn is_self_assignable(&self) -> bool {
        !self.is_admin()
    }
}

/// Unknown role code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid role: {0}")]
pub struct InvalidRole(pub String);

impl FromStr for UserRole {
    type Err = InvalidRole;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        UserRole::ALL
            .into_iter()
            .find(|role| role.code() == code)
            .ok_or_else(|| InvalidRole(code.to_string()))
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_student() {
        assert_eq!(UserRole::default(), UserRole::Student);
    }

    #[test]
    fn test_code_roundtrip() {
        for role in UserRole::ALL {
            assert_eq!(role.code().parse::<UserRole>(), Ok(role));
        }
        assert!("admin".parse::<UserRole>().is_err());
        assert!("Counselor".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(
            serde_json::to_string(&UserRole::Consultant).unwrap(),
            "\"Consultant\""
        );
        assert!(serde_json::from_str::<UserRole>("\"Janitor\"").is_err());
    }

    #[test]
    fn test_role_checks() {
        assert!(!UserRole::Admin.is_self_assignable());
        assert!(UserRole::Consultant.is_self_assignable());
        assert!(UserRole::Student.is_self_assignable());
    }
}
