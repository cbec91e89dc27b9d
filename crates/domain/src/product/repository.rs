//! Product repository trait and in-memory implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{CategoryId, IdSequence, ProductId};
use tokio::sync::RwLock;

use super::Product;
use crate::error::StoreError;

/// Persistence seam for products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Allocates a fresh id for a product about to be created.
    async fn next_id(&self) -> Result<ProductId, StoreError>;

    /// Inserts or replaces the product as a whole.
    async fn save(&self, product: Product) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Products listed under `category_id`, in insertion order.
    async fn find_all_by_category_id(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, StoreError>;

    /// True if any product references `category_id`.
    async fn exists_by_category_id(&self, category_id: CategoryId) -> Result<bool, StoreError>;
}

/// In-memory product store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<ProductId, Product>>>,
    ids: Arc<IdSequence>,
}

impl InMemoryProductRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored products.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// Returns true if the store holds no products.
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn next_id(&self) -> Result<ProductId, StoreError> {
        Ok(self.ids.next())
    }

    async fn save(&self, product: Product) -> Result<(), StoreError> {
        self.products.write().await.insert(product.id(), product);
        Ok(())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn find_all_by_category_id(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .products
            .read()
            .await
            .values()
            .filter(|p| p.category_id() == category_id)
            .cloned()
            .collect())
    }

    async fn exists_by_category_id(&self, category_id: CategoryId) -> Result<bool, StoreError> {
        Ok(self
            .products
            .read()
            .await
            .values()
            .any(|p| p.category_id() == category_id))
    }
}
