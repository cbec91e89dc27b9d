//! Order service: the one component that spans products and orders.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use common::{MemberId, OrderId};

use super::{Order, OrderError, OrderRepository, PlaceOrder};
use crate::category::CategoryRepository;
use crate::error::Result;
use crate::member::{MemberDirectory, MemberProfile};
use crate::product::{ProductRepository, ProductService};

/// Service for placing, reading and canceling orders.
///
/// Placement and cancellation hold the product's stock lock from the first
/// stock read until the order is persisted. If the order write fails the
/// stock change is reversed before the lock is released, so stock and
/// orders never disagree once the call returns.
pub struct OrderService<C, P, O, M>
where
    C: CategoryRepository,
    P: ProductRepository,
    O: OrderRepository,
    M: MemberDirectory,
{
    orders: O,
    products: Arc<ProductService<C, P>>,
    members: M,
}

impl<C, P, O, M> OrderService<C, P, O, M>
where
    C: CategoryRepository,
    P: ProductRepository,
    O: OrderRepository,
    M: MemberDirectory,
{
    /// Creates a new order service.
    pub fn new(orders: O, products: Arc<ProductService<C, P>>, members: M) -> Self {
        Self {
            orders,
            products,
            members,
        }
    }

    /// Returns a reference to the underlying order repository.
    pub fn repository(&self) -> &O {
        &self.orders
    }

    /// Places an order for `member_id`, taking stock from the product.
    #[tracing::instrument(skip(self, cmd), fields(product_id = %cmd.product_id, quantity = cmd.quantity))]
    pub async fn create(&self, member_id: Option<MemberId>, cmd: PlaceOrder) -> Result<OrderId> {
        let start = Instant::now();
        let result = self.place(member_id, cmd).await;

        match &result {
            Ok(order_id) => {
                metrics::counter!("orders_placed_total").increment(1);
                metrics::histogram!("order_placement_duration_seconds")
                    .record(start.elapsed().as_secs_f64());
                tracing::info!(%order_id, "order placed");
            }
            Err(err) => {
                metrics::counter!("order_placement_failures_total", "kind" => err.kind().as_str())
                    .increment(1);
                tracing::debug!(error = %err, "order placement rejected");
            }
        }
        result
    }

    async fn place(&self, member_id: Option<MemberId>, cmd: PlaceOrder) -> Result<OrderId> {
        let member = self.active_member(member_id).await?;

        let stock = self.products.lock_stock(cmd.product_id).await?;
        let product = self.products.get_public(cmd.product_id).await?;
        if !product.status().is_on_sale() {
            return Err(OrderError::ProductNotOnSale {
                product_id: product.id(),
                status: product.status(),
            }
            .into());
        }
        if cmd.quantity == 0 {
            return Err(OrderError::InvalidQuantity(cmd.quantity).into());
        }
        let shipping = cmd.shipping()?;

        // Built before touching stock so every validation failure is free.
        let order_id = self.orders.next_id().await?;
        let order = Order::place(
            order_id,
            member.id,
            &product,
            cmd.quantity,
            shipping,
            Utc::now(),
        )?;

        self.products
            .decrease_stock_locked(&stock, cmd.quantity)
            .await?;

        if let Err(err) = self.orders.save(order).await {
            tracing::warn!(%order_id, product_id = %product.id(), error = %err, "order write failed, restoring stock");
            metrics::counter!("stock_compensations_total").increment(1);
            self.products
                .increase_stock_locked(&stock, cmd.quantity)
                .await?;
            return Err(err.into());
        }
        Ok(order_id)
    }

    /// Loads one of the caller's orders.
    #[tracing::instrument(skip(self))]
    pub async fn get_detail(&self, member_id: Option<MemberId>, order_id: OrderId) -> Result<Order> {
        let member_id = member_id.ok_or(OrderError::Unauthenticated)?;
        self.owned_order(member_id, order_id).await
    }

    /// Cancels one of the caller's orders and returns its stock.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, member_id: Option<MemberId>, order_id: OrderId) -> Result<Order> {
        let member_id = member_id.ok_or(OrderError::Unauthenticated)?;
        let order = self.owned_order(member_id, order_id).await?;
        if !order.status().can_cancel() {
            return Err(OrderError::AlreadyCanceled(order_id).into());
        }

        let stock = self.products.lock_stock(order.product_id()).await?;
        // Reload under the lock; a concurrent cancel may have won the race.
        let mut order = self.owned_order(member_id, order_id).await?;
        order.cancel(Utc::now())?;

        self.products
            .increase_stock_locked(&stock, order.quantity())
            .await?;

        if let Err(err) = self.orders.save(order.clone()).await {
            tracing::warn!(%order_id, product_id = %order.product_id(), error = %err, "order write failed, taking stock back");
            metrics::counter!("stock_compensations_total").increment(1);
            self.products
                .decrease_stock_locked(&stock, order.quantity())
                .await?;
            return Err(err.into());
        }

        metrics::counter!("orders_canceled_total").increment(1);
        tracing::info!(%order_id, "order canceled");
        Ok(order)
    }

    /// The caller's orders, newest first.
    pub async fn list_mine(&self, member_id: Option<MemberId>) -> Result<Vec<Order>> {
        let member_id = member_id.ok_or(OrderError::Unauthenticated)?;
        let mut orders = self.orders.find_all_by_member_id(member_id).await?;
        newest_first(&mut orders);
        Ok(orders)
    }

    /// Every order, newest first. Requires the ADMIN role.
    #[tracing::instrument(skip(self))]
    pub async fn list_all(&self, caller: Option<MemberId>) -> Result<Vec<Order>> {
        let caller = self.resolve(caller).await?;
        if !caller.is_admin() {
            return Err(OrderError::AdminOnly(caller.id).into());
        }
        let mut orders = self.orders.find_all().await?;
        newest_first(&mut orders);
        Ok(orders)
    }

    async fn resolve(&self, member_id: Option<MemberId>) -> Result<MemberProfile> {
        let member_id = member_id.ok_or(OrderError::Unauthenticated)?;
        self.members
            .resolve(member_id)
            .await?
            .ok_or_else(|| OrderError::MemberNotFound(member_id).into())
    }

    async fn active_member(&self, member_id: Option<MemberId>) -> Result<MemberProfile> {
        let member = self.resolve(member_id).await?;
        if !member.is_active() {
            return Err(OrderError::MemberInactive(member.id).into());
        }
        Ok(member)
    }

    async fn owned_order(&self, member_id: MemberId, order_id: OrderId) -> Result<Order> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound(order_id))?;
        if !order.is_owned_by(member_id) {
            return Err(OrderError::NotOwner {
                order_id,
                member_id,
            }
            .into());
        }
        Ok(order)
    }
}

fn newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| {
        b.ordered_at()
            .cmp(&a.ordered_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
}
