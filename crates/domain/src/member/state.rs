//! Member status and role.

use serde::{Deserialize, Serialize};

/// Whether a member may place orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    #[default]
    Active,

    /// Suspended or withdrawn. Existing orders stay readable.
    Inactive,
}

impl MemberStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, MemberStatus::Active)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "ACTIVE",
            MemberStatus::Inactive => "INACTIVE",
        }
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Authorization role of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    #[default]
    User,

    /// May read every member's orders.
    Admin,
}

impl MemberRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, MemberRole::Admin)
    }

    /// Returns the role name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::User => "USER",
            MemberRole::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(MemberStatus::default(), MemberStatus::Active);
        assert_eq!(MemberRole::default(), MemberRole::User);
        assert!(!MemberRole::User.is_admin());
        assert!(MemberRole::Admin.is_admin());
    }

    #[test]
    fn wire_names() {
        let role: MemberRole = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, MemberRole::Admin);
        assert_eq!(
            serde_json::to_string(&MemberStatus::Inactive).unwrap(),
            "\"INACTIVE\""
        );
        assert_eq!(MemberStatus::Active.to_string(), "ACTIVE");
    }
}
