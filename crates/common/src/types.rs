use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

macro_rules! surrogate_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(NonZeroU64);

        impl $name {
            /// Wraps a raw id, returning `None` for zero.
            pub fn new(raw: u64) -> Option<Self> {
                NonZeroU64::new(raw).map(Self)
            }

            /// Returns the raw integer value.
            pub fn get(&self) -> u64 {
                self.0.get()
            }
        }

        impl From<NonZeroU64> for $name {
            fn from(raw: NonZeroU64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0.get()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

surrogate_id!(
    /// Identifier of a category in the catalog tree.
    CategoryId
);

surrogate_id!(
    /// Identifier of a sellable product.
    ProductId
);

surrogate_id!(
    /// Identifier of a placed order.
    OrderId
);

surrogate_id!(
    /// Identifier of a registered member.
    MemberId
);

/// Store-side id allocator.
///
/// Hands out strictly increasing positive ids starting at 1. Safe to share
/// between tasks; two concurrent callers never receive the same value.
#[derive(Debug, Default)]
pub struct IdSequence {
    last: AtomicU64,
}

impl IdSequence {
    /// Creates a sequence whose first id will be 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next id.
    pub fn next<T: From<NonZeroU64>>(&self) -> T {
        let previous = self.last.fetch_add(1, Ordering::Relaxed);
        T::from(NonZeroU64::MIN.saturating_add(previous))
    }

    /// Returns the most recently allocated raw id, or 0 if none.
    pub fn current(&self) -> u64 {
        self.last.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_a_valid_id() {
        assert!(CategoryId::new(0).is_none());
        assert_eq!(CategoryId::new(7).map(|id| id.get()), Some(7));
    }

    #[test]
    fn sequence_starts_at_one_and_increments() {
        let seq = IdSequence::new();
        let first: ProductId = seq.next();
        let second: ProductId = seq.next();
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
        assert_eq!(seq.current(), 2);
    }

    #[test]
    fn sequence_is_unique_across_threads() {
        let seq = std::sync::Arc::new(IdSequence::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let seq = seq.clone();
                std::thread::spawn(move || (0..100).map(|_| seq.next::<OrderId>()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<OrderId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 800);
    }

    #[test]
    fn id_serializes_as_plain_number() {
        let id = MemberId::new(42).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert!(serde_json::from_str::<MemberId>("0").is_err());
    }
}
