//! Per-product stock locks.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as SyncMutex, MutexGuard as SyncMutexGuard};

use common::ProductId;
use tokio::sync::{Mutex, OwnedMutexGuard};

type Registry = SyncMutex<HashMap<ProductId, Arc<Mutex<()>>>>;

/// One async mutex per product id, created on first use and dropped again
/// once the last guard or waiter for that id is gone.
///
/// Stock reads-modify-writes for the same product serialize on its mutex;
/// different products proceed in parallel. The registry itself sits behind
/// a plain mutex that is never held across an await point.
#[derive(Debug, Default)]
pub struct ProductLocks {
    registry: Arc<Registry>,
}

impl ProductLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `product_id`'s stock.
    pub async fn acquire(&self, product_id: ProductId) -> StockGuard {
        let lock = lock_registry(&self.registry)
            .entry(product_id)
            .or_default()
            .clone();
        StockGuard {
            product_id,
            registry: self.registry.clone(),
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Number of products with a live guard or waiter.
    pub fn len(&self) -> usize {
        lock_registry(&self.registry).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_registry(registry: &Registry) -> SyncMutexGuard<'_, HashMap<ProductId, Arc<Mutex<()>>>> {
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Proof that the holder has exclusive access to one product's stock.
#[derive(Debug)]
pub struct StockGuard {
    product_id: ProductId,
    registry: Arc<Registry>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl StockGuard {
    /// The product this guard covers.
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }
}

impl Drop for StockGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut registry = lock_registry(&self.registry);
        // Waiters clone the entry under the registry lock, so a count of one
        // means the map holds the only reference.
        if registry
            .get(&self.product_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            registry.remove(&self.product_id);
        }
    }
}
