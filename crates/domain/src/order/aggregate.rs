//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::{MemberId, OrderId, ProductId};
use serde::{Deserialize, Serialize};

use super::{OrderError, OrderStatus, ShippingInfo};
use crate::product::{Money, Product};

/// A placed order.
///
/// Product name and unit price are copied at placement so later catalog
/// edits never change historical orders. After placement the only mutation
/// is a single ORDERED → CANCELED transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    member_id: MemberId,
    product_id: ProductId,
    product_name: String,
    unit_price: Money,
    quantity: u32,
    total_price: Money,
    shipping: ShippingInfo,
    status: OrderStatus,
    ordered_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    canceled_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Builds an order from the product as it is right now.
    ///
    /// Sale eligibility and stock are the caller's concern; this only checks
    /// the quantity and that the total is representable.
    pub fn place(
        id: OrderId,
        member_id: MemberId,
        product: &Product,
        quantity: u32,
        shipping: ShippingInfo,
        now: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        if quantity == 0 {
            return Err(OrderError::InvalidQuantity(quantity));
        }
        let unit_price = product.price();
        let total_price =
            unit_price
                .checked_multiply(quantity)
                .ok_or(OrderError::TotalOverflow {
                    product_id: product.id(),
                    quantity,
                })?;

        Ok(Self {
            id,
            member_id,
            product_id: product.id(),
            product_name: product.name().to_string(),
            unit_price,
            quantity,
            total_price,
            shipping,
            status: OrderStatus::Ordered,
            ordered_at: now,
            updated_at: now,
            canceled_at: None,
        })
    }

    /// Flips the order to CANCELED. Fails if it already is.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), OrderError> {
        if !self.status.can_cancel() {
            return Err(OrderError::AlreadyCanceled(self.id));
        }
        self.status = OrderStatus::Canceled;
        self.canceled_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}

// Query methods
impl Order {
    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Product name at the time of placement.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Unit price at the time of placement.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn total_price(&self) -> Money {
        self.total_price
    }

    pub fn shipping(&self) -> &ShippingInfo {
        &self.shipping
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn ordered_at(&self) -> DateTime<Utc> {
        self.ordered_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn canceled_at(&self) -> Option<DateTime<Utc>> {
        self.canceled_at
    }

    pub fn is_owned_by(&self, member_id: MemberId) -> bool {
        self.member_id == member_id
    }
}

#[cfg(test)]
mod tests {
    use common::CategoryId;

    use super::*;

    fn product(price: i64) -> Product {
        Product::create(
            ProductId::new(3).unwrap(),
            CategoryId::new(1).unwrap(),
            "Laptop",
            price,
            10,
            None,
        )
        .unwrap()
    }

    fn shipping() -> ShippingInfo {
        ShippingInfo::new("홍길동", "010-1234-5678", "06236", "서울", None).unwrap()
    }

    fn place(product: &Product, quantity: u32) -> Result<Order, OrderError> {
        Order::place(
            OrderId::new(1).unwrap(),
            MemberId::new(7).unwrap(),
            product,
            quantity,
            shipping(),
            Utc::now(),
        )
    }

    #[test]
    fn place_snapshots_product() {
        let laptop = product(1000);
        let order = place(&laptop, 2).unwrap();
        assert_eq!(order.product_name(), "Laptop");
        assert_eq!(order.unit_price().amount(), 1000);
        assert_eq!(order.total_price().amount(), 2000);
        assert_eq!(order.status(), OrderStatus::Ordered);
        assert_eq!(order.ordered_at(), order.updated_at());
        assert!(order.canceled_at().is_none());
        assert!(order.is_owned_by(MemberId::new(7).unwrap()));
    }

    #[test]
    fn snapshot_survives_product_edits() {
        let mut laptop = product(1000);
        let order = place(&laptop, 1).unwrap();
        laptop.rename("Renamed").unwrap();
        laptop.change_price(5).unwrap();
        assert_eq!(order.product_name(), "Laptop");
        assert_eq!(order.unit_price().amount(), 1000);
    }

    #[test]
    fn zero_quantity_and_overflow_rejected() {
        assert_eq!(
            place(&product(1000), 0),
            Err(OrderError::InvalidQuantity(0))
        );
        assert!(matches!(
            place(&product(i64::MAX), 2),
            Err(OrderError::TotalOverflow { quantity: 2, .. })
        ));
    }

    #[test]
    fn cancel_exactly_once() {
        let mut order = place(&product(1000), 1).unwrap();
        let later = order.ordered_at() + chrono::Duration::seconds(5);

        order.cancel(later).unwrap();
        assert_eq!(order.status(), OrderStatus::Canceled);
        assert_eq!(order.canceled_at(), Some(later));
        assert_eq!(order.updated_at(), later);

        assert_eq!(
            order.cancel(later),
            Err(OrderError::AlreadyCanceled(order.id()))
        );
    }
}
