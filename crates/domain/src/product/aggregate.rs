//! Product aggregate implementation.

use common::{CategoryId, ProductId};
use serde::{Deserialize, Serialize};

use super::{Money, ProductError, ProductStatus};
use crate::text;

/// Maximum product name length, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum description length, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// A sellable product with its stock level.
///
/// Stock never drops below zero, and every stock change re-derives the
/// ON_SALE/SOLD_OUT pair via [`ProductStatus::after_stock_change`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    category_id: CategoryId,
    name: String,
    price: Money,
    stock: i64,
    description: Option<String>,
    status: ProductStatus,
}

impl Product {
    /// Creates a product after validating every field.
    ///
    /// The category reference must already have been checked by the caller.
    /// A product created with zero stock starts SOLD_OUT rather than ON_SALE.
    pub fn create(
        id: ProductId,
        category_id: CategoryId,
        name: &str,
        price: i64,
        stock: i64,
        description: Option<&str>,
    ) -> Result<Self, ProductError> {
        let stock = validate_stock(stock)?;
        Ok(Self {
            id,
            category_id,
            name: validate_name(name)?,
            price: validate_price(price)?,
            stock,
            description: validate_description(description)?,
            status: ProductStatus::OnSale.after_stock_change(stock),
        })
    }

    /// Runs the field checks of [`create`](Self::create) without an id.
    pub fn validate(
        name: &str,
        price: i64,
        stock: i64,
        description: Option<&str>,
    ) -> Result<(), ProductError> {
        validate_stock(stock)?;
        validate_name(name)?;
        validate_price(price)?;
        validate_description(description)?;
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, ProductError> {
    let trimmed = text::non_blank(name).ok_or(ProductError::NameRequired)?;
    let actual = text::char_len(trimmed);
    if actual > MAX_NAME_LEN {
        return Err(ProductError::NameTooLong {
            max: MAX_NAME_LEN,
            actual,
        });
    }
    Ok(trimmed.to_string())
}

fn validate_price(price: i64) -> Result<Money, ProductError> {
    Money::new(price).ok_or(ProductError::InvalidPrice(price))
}

fn validate_stock(stock: i64) -> Result<i64, ProductError> {
    if stock < 0 {
        return Err(ProductError::InvalidStock(stock));
    }
    Ok(stock)
}

/// Blank or absent descriptions are stored as `None`.
fn validate_description(description: Option<&str>) -> Result<Option<String>, ProductError> {
    let Some(trimmed) = description.and_then(text::non_blank) else {
        return Ok(None);
    };
    let actual = text::char_len(trimmed);
    if actual > MAX_DESCRIPTION_LEN {
        return Err(ProductError::DescriptionTooLong {
            max: MAX_DESCRIPTION_LEN,
            actual,
        });
    }
    Ok(Some(trimmed.to_string()))
}

// Query methods
impl Product {
    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    /// Returns true if shoppers can see this product.
    pub fn is_publicly_visible(&self) -> bool {
        self.status.is_publicly_visible()
    }
}

// Mutations
impl Product {
    pub fn change_category(&mut self, category_id: CategoryId) {
        self.category_id = category_id;
    }

    pub fn rename(&mut self, name: &str) -> Result<(), ProductError> {
        self.name = validate_name(name)?;
        Ok(())
    }

    pub fn change_price(&mut self, price: i64) -> Result<(), ProductError> {
        self.price = validate_price(price)?;
        Ok(())
    }

    /// Overwrites the stock level (admin correction).
    pub fn change_stock(&mut self, stock: i64) -> Result<(), ProductError> {
        self.set_stock(validate_stock(stock)?);
        Ok(())
    }

    /// Replaces the description; blank clears it.
    pub fn change_description(&mut self, description: &str) -> Result<(), ProductError> {
        self.description = validate_description(Some(description))?;
        Ok(())
    }

    /// Applies an explicit admin status change through the transition table.
    pub fn change_status(&mut self, target: ProductStatus) -> Result<(), ProductError> {
        self.status = self.status.transition(target, self.stock)?;
        Ok(())
    }

    /// Removes `quantity` units. Fails without side effects if there is not
    /// enough stock.
    pub fn decrease_stock(&mut self, quantity: u32) -> Result<(), ProductError> {
        if quantity == 0 {
            return Err(ProductError::InvalidQuantity(quantity));
        }
        let requested = i64::from(quantity);
        if requested > self.stock {
            return Err(ProductError::InsufficientStock {
                product_id: self.id,
                requested: quantity,
                available: self.stock,
            });
        }
        self.set_stock(self.stock - requested);
        Ok(())
    }

    /// Adds `quantity` units.
    pub fn increase_stock(&mut self, quantity: u32) -> Result<(), ProductError> {
        if quantity == 0 {
            return Err(ProductError::InvalidQuantity(quantity));
        }
        let stock = self
            .stock
            .checked_add(i64::from(quantity))
            .ok_or(ProductError::StockOverflow(self.id))?;
        self.set_stock(stock);
        Ok(())
    }

    fn set_stock(&mut self, stock: i64) {
        self.stock = stock;
        self.status = self.status.after_stock_change(stock);
    }
}
