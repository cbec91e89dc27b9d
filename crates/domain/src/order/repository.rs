//! Order repository trait and in-memory implementation.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use common::{IdSequence, MemberId, OrderId};
use tokio::sync::RwLock;

use super::Order;
use crate::error::StoreError;

/// Persistence seam for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn next_id(&self) -> Result<OrderId, StoreError>;

    async fn save(&self, order: Order) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    async fn find_all_by_member_id(&self, member_id: MemberId) -> Result<Vec<Order>, StoreError>;

    async fn find_all(&self) -> Result<Vec<Order>, StoreError>;
}

/// In-memory order store.
///
/// `set_fail_on_save` makes every save fail, for exercising the
/// compensation paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<BTreeMap<OrderId, Order>>>,
    ids: Arc<IdSequence>,
    fail_on_save: Arc<AtomicBool>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to reject saves.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.fail_on_save.store(fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn next_id(&self) -> Result<OrderId, StoreError> {
        Ok(self.ids.next())
    }

    async fn save(&self, order: Order) -> Result<(), StoreError> {
        if self.fail_on_save.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "order {} could not be written",
                order.id()
            )));
        }
        self.orders.write().await.insert(order.id(), order);
        Ok(())
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn find_all_by_member_id(&self, member_id: MemberId) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .orders
            .read()
            .await
            .values()
            .filter(|o| o.member_id() == member_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.orders.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use common::{CategoryId, ProductId};

    use super::*;
    use crate::order::ShippingInfo;
    use crate::product::Product;

    async fn order_for(repo: &InMemoryOrderRepository, member: u64) -> Order {
        let product = Product::create(
            ProductId::new(1).unwrap(),
            CategoryId::new(1).unwrap(),
            "Pen",
            10,
            5,
            None,
        )
        .unwrap();
        let shipping = ShippingInfo::new("Kim", "010-1234-5678", "12345", "Seoul", None).unwrap();
        Order::place(
            repo.next_id().await.unwrap(),
            MemberId::new(member).unwrap(),
            &product,
            1,
            shipping,
            Utc::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn filters_by_member() {
        let repo = InMemoryOrderRepository::new();
        for member in [1, 2, 1] {
            let order = order_for(&repo, member).await;
            repo.save(order).await.unwrap();
        }
        let mine = repo
            .find_all_by_member_id(MemberId::new(1).unwrap())
            .await
            .unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(repo.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn fail_on_save() {
        let repo = InMemoryOrderRepository::new();
        repo.set_fail_on_save(true);
        let order = order_for(&repo, 1).await;
        assert!(repo.save(order).await.is_err());
        assert!(repo.is_empty().await);

        repo.set_fail_on_save(false);
        let order = order_for(&repo, 1).await;
        assert!(repo.save(order).await.is_ok());
    }
}
