//! Domain layer for the storefront backend.
//!
//! This crate provides:
//! - Category tree with case-insensitive unique names and acyclic parents
//! - Products with stock accounting and a derived sale status
//! - Members and the [`MemberDirectory`] identity boundary
//! - Orders that snapshot product data and move stock under a per-product lock
//!
//! Every repository is an async trait with an in-memory implementation.

pub mod category;
pub mod error;
pub mod member;
pub mod order;
pub mod product;
mod text;

pub use category::{Category, CategoryError, CategoryService, CategoryStatus, CategoryUpdate};
pub use error::{DomainError, ErrorKind, Result, StoreError};
pub use member::{
    Member, MemberDirectory, MemberError, MemberProfile, MemberRole, MemberService, MemberStatus,
};
pub use order::{Order, OrderError, OrderService, OrderStatus, PlaceOrder, ShippingInfo};
pub use product::{
    CreateProduct, Money, Product, ProductError, ProductService, ProductStatus, UpdateProduct,
};
