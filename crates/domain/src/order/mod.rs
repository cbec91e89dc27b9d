//! Order aggregate, repository, and the service that ties orders to stock.

mod aggregate;
mod commands;
mod repository;
mod service;
mod state;
mod value_objects;

pub use aggregate::Order;
pub use commands::PlaceOrder;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
pub use state::OrderStatus;
pub use value_objects::{
    MAX_ADDRESS_LEN, MAX_RECIPIENT_NAME_LEN, MAX_REQUEST_MESSAGE_LEN, MAX_ZIP_CODE_LEN,
    ShippingInfo,
};

use common::{MemberId, OrderId, ProductId};
use thiserror::Error;

use crate::error::ErrorKind;
use crate::product::ProductStatus;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Order does not exist.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// No caller identity was supplied.
    #[error("Login required")]
    Unauthenticated,

    /// Caller identity does not resolve to a member.
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    /// Caller is not an ACTIVE member.
    #[error("Member {0} is not active")]
    MemberInactive(MemberId),

    /// Caller does not own the order.
    #[error("Order {order_id} does not belong to member {member_id}")]
    NotOwner {
        order_id: OrderId,
        member_id: MemberId,
    },

    /// Caller lacks the ADMIN role.
    #[error("Member {0} is not an administrator")]
    AdminOnly(MemberId),

    /// Product exists but cannot be bought right now.
    #[error("Product {product_id} is not on sale ({status})")]
    ProductNotOnSale {
        product_id: ProductId,
        status: ProductStatus,
    },

    #[error("Invalid quantity: {0} (must be at least 1)")]
    InvalidQuantity(u32),

    /// ORDERED → CANCELED happens at most once.
    #[error("Order {0} is already canceled")]
    AlreadyCanceled(OrderId),

    #[error("{field} is required")]
    FieldRequired { field: &'static str },

    #[error("{field} must be at most {max} characters (got {actual})")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Phone must be 9 to 20 characters of digits and `-`.
    #[error("Invalid recipient phone: {phone}")]
    InvalidPhone { phone: String },

    /// Unit price × quantity does not fit in the money type.
    #[error("Order total overflows for product {product_id} × {quantity}")]
    TotalOverflow {
        product_id: ProductId,
        quantity: u32,
    },
}

impl OrderError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NotFound(_) | OrderError::MemberNotFound(_) => ErrorKind::NotFound,
            OrderError::Unauthenticated => ErrorKind::Unauthorized,
            OrderError::MemberInactive(_)
            | OrderError::NotOwner { .. }
            | OrderError::AdminOnly(_) => ErrorKind::Forbidden,
            OrderError::ProductNotOnSale { .. } | OrderError::AlreadyCanceled(_) => {
                ErrorKind::Conflict
            }
            OrderError::InvalidQuantity(_)
            | OrderError::FieldRequired { .. }
            | OrderError::FieldTooLong { .. }
            | OrderError::InvalidPhone { .. }
            | OrderError::TotalOverflow { .. } => ErrorKind::BadRequest,
        }
    }
}
