//! Product aggregate, stock accounting, and related types.

mod aggregate;
mod commands;
mod locks;
mod repository;
mod service;
mod state;
mod value_objects;

pub use aggregate::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN, Product};
pub use commands::{CreateProduct, UpdateProduct};
pub use locks::{ProductLocks, StockGuard};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
pub use state::ProductStatus;
pub use value_objects::Money;

use common::ProductId;
use thiserror::Error;

use crate::error::ErrorKind;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    /// Product does not exist (or is not visible to the caller).
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Name is missing or blank.
    #[error("Product name is required")]
    NameRequired,

    /// Name exceeds the length limit.
    #[error("Product name must be at most {max} characters (got {actual})")]
    NameTooLong { max: usize, actual: usize },

    /// Description exceeds the length limit.
    #[error("Product description must be at most {max} characters (got {actual})")]
    DescriptionTooLong { max: usize, actual: usize },

    /// Price below zero.
    #[error("Invalid price: {0} (must be 0 or greater)")]
    InvalidPrice(i64),

    /// Stock below zero.
    #[error("Invalid stock: {0} (must be 0 or greater)")]
    InvalidStock(i64),

    /// Stock adjustment quantity below one.
    #[error("Invalid quantity: {0} (must be at least 1)")]
    InvalidQuantity(u32),

    /// Not enough stock to satisfy a decrement.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: i64,
    },

    /// Stock increment would overflow.
    #[error("Stock for product {0} would overflow")]
    StockOverflow(ProductId),

    /// Status change rejected by the transition table.
    #[error("Cannot change product status from {from} to {to}: {reason}")]
    InvalidTransition {
        from: ProductStatus,
        to: ProductStatus,
        reason: &'static str,
    },

    /// SOLD_OUT was requested explicitly.
    #[error("SOLD_OUT is derived from stock and cannot be set directly")]
    DerivedStatus,
}

impl ProductError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProductError::NotFound(_) => ErrorKind::NotFound,
            ProductError::NameRequired
            | ProductError::NameTooLong { .. }
            | ProductError::DescriptionTooLong { .. }
            | ProductError::InvalidPrice(_)
            | ProductError::InvalidStock(_)
            | ProductError::InvalidQuantity(_)
            | ProductError::DerivedStatus => ErrorKind::BadRequest,
            ProductError::InsufficientStock { .. }
            | ProductError::StockOverflow(_)
            | ProductError::InvalidTransition { .. } => ErrorKind::Conflict,
        }
    }
}
