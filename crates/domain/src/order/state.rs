//! Order state machine.

use serde::{Deserialize, Serialize};

/// The state of an order in its lifecycle.
///
/// State transitions:
/// ```text
/// Ordered ──► Canceled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed; stock has been taken.
    #[default]
    Ordered,

    /// Canceled and stock returned (terminal state).
    Canceled,
}

impl OrderStatus {
    /// Returns true if the order can be canceled in this state.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Ordered)
    }

    /// Returns true if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Canceled)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Ordered => "ORDERED",
            OrderStatus::Canceled => "CANCELED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_ordered() {
        assert_eq!(OrderStatus::default(), OrderStatus::Ordered);
    }

    #[test]
    fn test_only_ordered_can_cancel() {
        assert!(OrderStatus::Ordered.can_cancel());
        assert!(!OrderStatus::Canceled.can_cancel());
        assert!(OrderStatus::Canceled.is_terminal());
        assert!(!OrderStatus::Ordered.is_terminal());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&OrderStatus::Canceled).unwrap();
        assert_eq!(json, "\"CANCELED\"");
        let back: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OrderStatus::Canceled);
    }
}
