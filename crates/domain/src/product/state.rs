//! Product sale-status state machine.

use serde::{Deserialize, Serialize};

use super::ProductError;

/// Sale status of a product.
///
/// Explicit transitions (checked centrally by [`ProductStatus::transition`]):
/// ```text
///                  │ ON_SALE  │ HIDDEN   │ DISCONTINUED
/// ─────────────────┼──────────┼──────────┼─────────────
/// DISCONTINUED     │ reject   │ reject   │ no-op
/// any, stock = 0   │ reject   │ allow    │ allow
/// any, stock > 0   │ allow    │ allow    │ allow
/// ```
/// `SOLD_OUT` is never a target; it is derived from stock by
/// [`ProductStatus::after_stock_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    /// Purchasable.
    #[default]
    OnSale,

    /// Hidden from the storefront by an admin.
    Hidden,

    /// Stock reached zero while on sale.
    SoldOut,

    /// Permanently withdrawn (terminal).
    Discontinued,
}

impl ProductStatus {
    /// Returns true if shoppers can see the product.
    pub fn is_publicly_visible(&self) -> bool {
        !matches!(self, ProductStatus::Hidden | ProductStatus::Discontinued)
    }

    /// Returns true if the product can be ordered.
    pub fn is_on_sale(&self) -> bool {
        matches!(self, ProductStatus::OnSale)
    }

    /// Returns true if no further status changes are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProductStatus::Discontinued)
    }

    /// Computes the status an explicit admin request moves to, given the
    /// current stock.
    pub fn transition(self, target: ProductStatus, stock: i64) -> Result<Self, ProductError> {
        let reject = |reason: &'static str| ProductError::InvalidTransition {
            from: self,
            to: target,
            reason,
        };

        match (self, target) {
            (_, ProductStatus::SoldOut) => Err(ProductError::DerivedStatus),
            (ProductStatus::Discontinued, ProductStatus::Discontinued) => Ok(self),
            (ProductStatus::Discontinued, _) => Err(reject("product is discontinued")),
            (_, ProductStatus::OnSale) if stock == 0 => Err(reject("stock is zero")),
            (_, target) => Ok(target),
        }
    }

    /// Derives the status after stock changed to `stock`.
    ///
    /// ON_SALE at zero becomes SOLD_OUT; SOLD_OUT above zero becomes ON_SALE.
    /// HIDDEN and DISCONTINUED are left alone.
    pub fn after_stock_change(self, stock: i64) -> Self {
        match self {
            ProductStatus::OnSale if stock == 0 => ProductStatus::SoldOut,
            ProductStatus::SoldOut if stock > 0 => ProductStatus::OnSale,
            other => other,
        }
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::OnSale => "ON_SALE",
            ProductStatus::Hidden => "HIDDEN",
            ProductStatus::SoldOut => "SOLD_OUT",
            ProductStatus::Discontinued => "DISCONTINUED",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
