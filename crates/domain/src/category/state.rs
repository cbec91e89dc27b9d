//! Category visibility state.

use serde::{Deserialize, Serialize};

/// Whether a category is shown on the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryStatus {
    /// Visible to shoppers.
    #[default]
    Active,

    /// Hidden from the storefront, still visible to admins.
    Inactive,
}

impl CategoryStatus {
    /// Returns true if the category is visible to shoppers.
    pub fn is_active(&self) -> bool {
        matches!(self, CategoryStatus::Active)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryStatus::Active => "ACTIVE",
            CategoryStatus::Inactive => "INACTIVE",
        }
    }
}

impl std::fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_active() {
        assert_eq!(CategoryStatus::default(), CategoryStatus::Active);
        assert!(CategoryStatus::Active.is_active());
        assert!(!CategoryStatus::Inactive.is_active());
    }

    #[test]
    fn serializes_as_screaming_case() {
        let json = serde_json::to_string(&CategoryStatus::Inactive).unwrap();
        assert_eq!(json, "\"INACTIVE\"");
    }
}
