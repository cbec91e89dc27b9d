//! Product commands.

use common::CategoryId;
use serde::Deserialize;

/// Command to create a new product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    /// Category the product is listed under. Must exist.
    pub category_id: CategoryId,

    pub name: String,

    /// Unit price, 0 or greater.
    pub price: i64,

    /// Initial stock, 0 or greater.
    pub stock: i64,

    #[serde(default)]
    pub description: Option<String>,
}

impl CreateProduct {
    /// Creates a new CreateProduct command without a description.
    pub fn new(category_id: CategoryId, name: impl Into<String>, price: i64, stock: i64) -> Self {
        Self {
            category_id,
            name: name.into(),
            price,
            stock,
            description: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update of a product. `None` leaves the field unchanged;
/// `Some("")` for the description clears it.
///
/// A stock value here is an admin correction. It goes through the same floor
/// check as order-driven decrements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdateProduct {
    pub category_id: Option<CategoryId>,
    pub name: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i64>,
    pub description: Option<String>,
}

impl UpdateProduct {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price(mut self, price: i64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
