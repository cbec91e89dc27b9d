//! Category service: tree maintenance under name and shape invariants.

use common::CategoryId;
use tokio::sync::{Mutex, MutexGuard};

use super::{Category, CategoryError, CategoryRepository, CategoryStatus};
use crate::error::Result;
use crate::product::ProductRepository;

/// Partial update for a category. `None` leaves the field unchanged.
///
/// `parent_id` cannot be cleared: a category with a parent can move under
/// another parent but not back to the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub status: Option<CategoryStatus>,
}

impl CategoryUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn parent(mut self, parent_id: CategoryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn status(mut self, status: CategoryStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// A category verified to exist, held together with the tree lock.
///
/// While this value lives, the category cannot be deleted. Product writes
/// that attach to a category hold one so that a concurrent delete either
/// sees the product or happens strictly before the attach.
pub struct PinnedCategory<'a> {
    category: Category,
    _tree: MutexGuard<'a, ()>,
}

impl PinnedCategory<'_> {
    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn id(&self) -> CategoryId {
        self.category.id()
    }
}

/// Service owning category name uniqueness and tree acyclicity.
///
/// Every mutation runs under a single tree lock, so the uniqueness and
/// cycle checks observe the same state the write lands on.
pub struct CategoryService<C, P>
where
    C: CategoryRepository,
    P: ProductRepository,
{
    categories: C,
    products: P,
    tree: Mutex<()>,
}

impl<C, P> CategoryService<C, P>
where
    C: CategoryRepository,
    P: ProductRepository,
{
    /// Creates a new category service.
    ///
    /// `products` is consulted only to block deletion of referenced categories.
    pub fn new(categories: C, products: P) -> Self {
        Self {
            categories,
            products,
            tree: Mutex::new(()),
        }
    }

    /// Returns a reference to the underlying category repository.
    pub fn repository(&self) -> &C {
        &self.categories
    }

    /// Creates a category, optionally under an existing parent.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, name: &str, parent_id: Option<CategoryId>) -> Result<CategoryId> {
        let _tree = self.tree.lock().await;

        // Rejected names must not consume an id.
        let (_, key) = Category::validate_name(name)?;
        if self.categories.exists_by_name_key(&key, None).await? {
            return Err(CategoryError::DuplicateName {
                name: name.trim().to_string(),
            }
            .into());
        }
        if let Some(parent_id) = parent_id
            && self.categories.find_by_id(parent_id).await?.is_none()
        {
            return Err(CategoryError::ParentNotFound(parent_id).into());
        }

        let id = self.categories.next_id().await?;
        let category = Category::create(id, name, parent_id)?;
        self.categories.save(category).await?;

        metrics::counter!("categories_created_total").increment(1);
        tracing::info!(category_id = %id, "category created");
        Ok(id)
    }

    /// Loads a category regardless of status.
    pub async fn get(&self, id: CategoryId) -> Result<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| CategoryError::NotFound(id).into())
    }

    /// Loads a category visible on the storefront. Inactive ones are reported
    /// as missing.
    pub async fn get_public(&self, id: CategoryId) -> Result<Category> {
        let category = self.get(id).await?;
        if !category.is_active() {
            return Err(CategoryError::NotFound(id).into());
        }
        Ok(category)
    }

    /// All categories in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Category>> {
        Ok(self.categories.find_all().await?)
    }

    /// Active categories in insertion order.
    pub async fn list_all_public(&self) -> Result<Vec<Category>> {
        let mut all = self.categories.find_all().await?;
        all.retain(Category::is_active);
        Ok(all)
    }

    /// Applies a partial update.
    ///
    /// Each supplied field is validated in turn against a working copy; the
    /// copy is saved only if every field passes, so a rejected update leaves
    /// the stored category untouched.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: CategoryId, update: CategoryUpdate) -> Result<Category> {
        let _tree = self.tree.lock().await;

        let mut category = self.get(id).await?;

        if let Some(name) = update.name.as_deref() {
            let key = Category::normalize_key(name);
            if key.is_empty() {
                return Err(CategoryError::NameRequired.into());
            }
            if self.categories.exists_by_name_key(&key, Some(id)).await? {
                return Err(CategoryError::DuplicateName {
                    name: name.trim().to_string(),
                }
                .into());
            }
            category.rename(name)?;
        }

        if let Some(parent_id) = update.parent_id {
            if parent_id == id {
                return Err(CategoryError::SelfParent(id).into());
            }
            if self.categories.find_by_id(parent_id).await?.is_none() {
                return Err(CategoryError::ParentNotFound(parent_id).into());
            }
            self.ensure_no_cycle(id, parent_id).await?;
            category.change_parent(parent_id)?;
        }

        if let Some(status) = update.status {
            category.set_status(status);
        }

        self.categories.save(category.clone()).await?;
        tracing::info!(category_id = %id, "category updated");
        Ok(category)
    }

    /// Deletes a leaf category that no product references.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: CategoryId) -> Result<()> {
        let _tree = self.tree.lock().await;

        self.get(id).await?;
        if self.categories.exists_by_parent_id(id).await? {
            return Err(CategoryError::HasChildren(id).into());
        }
        if self.products.exists_by_category_id(id).await? {
            return Err(CategoryError::HasProducts(id).into());
        }

        self.categories.delete_by_id(id).await?;
        tracing::info!(category_id = %id, "category deleted");
        Ok(())
    }

    /// Verifies the category exists and holds the tree lock until the
    /// returned value is dropped.
    pub async fn pin(&self, id: CategoryId) -> Result<PinnedCategory<'_>> {
        let tree = self.tree.lock().await;
        let category = self.get(id).await?;
        Ok(PinnedCategory {
            category,
            _tree: tree,
        })
    }

    /// Walks up from `new_parent` and fails if the walk reaches `category_id`.
    ///
    /// Linear in the depth of the tree. Terminates because the tree is
    /// acyclic before every successful mutation and the caller holds the
    /// tree lock.
    async fn ensure_no_cycle(&self, category_id: CategoryId, new_parent: CategoryId) -> Result<()> {
        let mut current = Some(new_parent);
        while let Some(node) = current {
            if node == category_id {
                return Err(CategoryError::Cycle {
                    category_id,
                    parent_id: new_parent,
                }
                .into());
            }
            current = self
                .categories
                .find_by_id(node)
                .await?
                .ok_or(CategoryError::NotFound(node))?
                .parent_id();
        }
        Ok(())
    }
}
