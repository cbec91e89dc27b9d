//! Shared identifier types for the storefront backend.

mod types;

pub use types::{CategoryId, IdSequence, MemberId, OrderId, ProductId};
