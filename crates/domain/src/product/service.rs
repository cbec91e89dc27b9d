//! Product service: catalog writes and stock accounting.

use std::sync::Arc;

use common::{CategoryId, ProductId};

use super::{
    CreateProduct, Product, ProductError, ProductLocks, ProductRepository, ProductStatus,
    StockGuard, UpdateProduct,
};
use crate::category::{CategoryRepository, CategoryService};
use crate::error::Result;

/// Service owning stock accounting and derived sale status.
///
/// Category existence is always delegated to [`CategoryService`]. Every
/// write to a product holds that product's [`StockGuard`], so concurrent
/// decrements on one product never both pass the floor check.
pub struct ProductService<C, P>
where
    C: CategoryRepository,
    P: ProductRepository,
{
    products: P,
    categories: Arc<CategoryService<C, P>>,
    locks: ProductLocks,
}

impl<C, P> ProductService<C, P>
where
    C: CategoryRepository,
    P: ProductRepository,
{
    /// Creates a new product service.
    pub fn new(products: P, categories: Arc<CategoryService<C, P>>) -> Self {
        Self {
            products,
            categories,
            locks: ProductLocks::new(),
        }
    }

    /// Returns a reference to the underlying product repository.
    pub fn repository(&self) -> &P {
        &self.products
    }

    /// Creates a product under an existing category.
    #[tracing::instrument(skip(self), fields(category_id = %cmd.category_id))]
    pub async fn create(&self, cmd: CreateProduct) -> Result<ProductId> {
        let category = self.categories.pin(cmd.category_id).await?;
        Product::validate(&cmd.name, cmd.price, cmd.stock, cmd.description.as_deref())?;

        let id = self.products.next_id().await?;
        let product = Product::create(
            id,
            category.id(),
            &cmd.name,
            cmd.price,
            cmd.stock,
            cmd.description.as_deref(),
        )?;
        self.products.save(product).await?;

        metrics::counter!("products_created_total").increment(1);
        tracing::info!(product_id = %id, "product created");
        Ok(id)
    }

    /// Loads a product regardless of status.
    pub async fn get(&self, id: ProductId) -> Result<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id).into())
    }

    /// Loads a product for the storefront. HIDDEN and DISCONTINUED products
    /// are reported as missing.
    pub async fn get_public(&self, id: ProductId) -> Result<Product> {
        let product = self.get(id).await?;
        if !product.is_publicly_visible() {
            return Err(ProductError::NotFound(id).into());
        }
        Ok(product)
    }

    /// All products of a category (admin view).
    pub async fn list_by_category(&self, category_id: CategoryId) -> Result<Vec<Product>> {
        self.categories.get(category_id).await?;
        Ok(self.products.find_all_by_category_id(category_id).await?)
    }

    /// Publicly visible products of an active category.
    pub async fn list_public_by_category(&self, category_id: CategoryId) -> Result<Vec<Product>> {
        self.categories.get_public(category_id).await?;
        let mut products = self.products.find_all_by_category_id(category_id).await?;
        products.retain(Product::is_publicly_visible);
        Ok(products)
    }

    /// Applies a partial update. Nothing is saved unless every supplied
    /// field validates.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: ProductId, update: UpdateProduct) -> Result<Product> {
        let _stock = self.lock_stock(id).await?;
        let mut product = self.get(id).await?;

        // Held until the save so the target category cannot vanish meanwhile.
        let pinned = match update.category_id {
            Some(category_id) => Some(self.categories.pin(category_id).await?),
            None => None,
        };
        if let Some(category) = &pinned {
            product.change_category(category.id());
        }
        if let Some(name) = update.name.as_deref() {
            product.rename(name)?;
        }
        if let Some(price) = update.price {
            product.change_price(price)?;
        }
        if let Some(stock) = update.stock {
            product.change_stock(stock)?;
        }
        if let Some(description) = update.description.as_deref() {
            product.change_description(description)?;
        }

        self.products.save(product.clone()).await?;
        tracing::info!(product_id = %id, "product updated");
        Ok(product)
    }

    /// Explicit admin status change, checked against the transition table.
    #[tracing::instrument(skip(self))]
    pub async fn change_status(&self, id: ProductId, target: ProductStatus) -> Result<Product> {
        let _stock = self.lock_stock(id).await?;
        let mut product = self.get(id).await?;
        product.change_status(target)?;
        self.products.save(product.clone()).await?;
        tracing::info!(product_id = %id, status = %product.status(), "product status changed");
        Ok(product)
    }

    /// Removes `quantity` units from stock.
    #[tracing::instrument(skip(self))]
    pub async fn decrease_stock(&self, id: ProductId, quantity: u32) -> Result<Product> {
        let guard = self.lock_stock(id).await?;
        self.decrease_stock_locked(&guard, quantity).await
    }

    /// Adds `quantity` units to stock.
    #[tracing::instrument(skip(self))]
    pub async fn increase_stock(&self, id: ProductId, quantity: u32) -> Result<Product> {
        let guard = self.lock_stock(id).await?;
        self.increase_stock_locked(&guard, quantity).await
    }

    /// Takes exclusive access to a product's stock for a multi-step
    /// operation. Use the `*_locked` methods while holding it; the unlocked
    /// variants would wait on the same mutex forever.
    ///
    /// Fails with `NotFound` before any lock is taken if the product does
    /// not exist.
    pub async fn lock_stock(&self, id: ProductId) -> Result<StockGuard> {
        self.get(id).await?;
        Ok(self.locks.acquire(id).await)
    }

    /// The per-product lock registry.
    pub fn locks(&self) -> &ProductLocks {
        &self.locks
    }

    /// [`decrease_stock`](Self::decrease_stock) for a caller already holding
    /// the product's guard.
    pub async fn decrease_stock_locked(&self, guard: &StockGuard, quantity: u32) -> Result<Product> {
        let mut product = self.get(guard.product_id()).await?;
        product.decrease_stock(quantity)?;
        self.products.save(product.clone()).await?;
        tracing::debug!(product_id = %product.id(), stock = product.stock(), "stock decreased");
        Ok(product)
    }

    /// [`increase_stock`](Self::increase_stock) for a caller already holding
    /// the product's guard.
    pub async fn increase_stock_locked(&self, guard: &StockGuard, quantity: u32) -> Result<Product> {
        let mut product = self.get(guard.product_id()).await?;
        product.increase_stock(quantity)?;
        self.products.save(product.clone()).await?;
        tracing::debug!(product_id = %product.id(), stock = product.stock(), "stock increased");
        Ok(product)
    }
}
