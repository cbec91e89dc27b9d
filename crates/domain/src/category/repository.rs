//! Category repository trait and in-memory implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{CategoryId, IdSequence};
use tokio::sync::RwLock;

use super::Category;
use crate::error::StoreError;

/// Persistence seam for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Allocates a fresh id for a category about to be created.
    async fn next_id(&self) -> Result<CategoryId, StoreError>;

    /// Inserts or replaces the category as a whole.
    async fn save(&self, category: Category) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    /// Returns all categories in insertion order.
    async fn find_all(&self) -> Result<Vec<Category>, StoreError>;

    /// True if some category other than `except` uses `name_key`.
    async fn exists_by_name_key(
        &self,
        name_key: &str,
        except: Option<CategoryId>,
    ) -> Result<bool, StoreError>;

    /// True if any category names `parent_id` as its parent.
    async fn exists_by_parent_id(&self, parent_id: CategoryId) -> Result<bool, StoreError>;

    /// Removes the category. Returns false if it was not present.
    async fn delete_by_id(&self, id: CategoryId) -> Result<bool, StoreError>;
}

/// In-memory category store.
///
/// Ids come from a monotonic sequence, so ordering the map by id is the same
/// as ordering by insertion.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<BTreeMap<CategoryId, Category>>>,
    ids: Arc<IdSequence>,
}

impl InMemoryCategoryRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored categories.
    pub async fn len(&self) -> usize {
        self.categories.read().await.len()
    }

    /// Returns true if the store holds no categories.
    pub async fn is_empty(&self) -> bool {
        self.categories.read().await.is_empty()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn next_id(&self) -> Result<CategoryId, StoreError> {
        Ok(self.ids.next())
    }

    async fn save(&self, category: Category) -> Result<(), StoreError> {
        self.categories
            .write()
            .await
            .insert(category.id(), category);
        Ok(())
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.categories.read().await.values().cloned().collect())
    }

    async fn exists_by_name_key(
        &self,
        name_key: &str,
        except: Option<CategoryId>,
    ) -> Result<bool, StoreError> {
        Ok(self
            .categories
            .read()
            .await
            .values()
            .any(|c| c.name_key() == name_key && Some(c.id()) != except))
    }

    async fn exists_by_parent_id(&self, parent_id: CategoryId) -> Result<bool, StoreError> {
        Ok(self
            .categories
            .read()
            .await
            .values()
            .any(|c| c.parent_id() == Some(parent_id)))
    }

    async fn delete_by_id(&self, id: CategoryId) -> Result<bool, StoreError> {
        Ok(self.categories.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn insert(repo: &InMemoryCategoryRepository, name: &str, parent: Option<CategoryId>) -> CategoryId {
        let id = repo.next_id().await.unwrap();
        repo.save(Category::create(id, name, parent).unwrap())
            .await
            .unwrap();
        id
    }

    #[tokio::test]
    async fn find_all_preserves_insertion_order() {
        let repo = InMemoryCategoryRepository::new();
        let a = insert(&repo, "Zeta", None).await;
        let b = insert(&repo, "Alpha", None).await;
        let c = insert(&repo, "Mid", Some(a)).await;

        let ids: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|c| c.id())
            .collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[tokio::test]
    async fn name_key_lookup_can_exclude_self() {
        let repo = InMemoryCategoryRepository::new();
        let id = insert(&repo, "Books", None).await;

        assert!(repo.exists_by_name_key("books", None).await.unwrap());
        assert!(!repo.exists_by_name_key("books", Some(id)).await.unwrap());
        assert!(!repo.exists_by_name_key("music", None).await.unwrap());
    }

    #[tokio::test]
    async fn parent_lookup_and_delete() {
        let repo = InMemoryCategoryRepository::new();
        let root = insert(&repo, "Root", None).await;
        let child = insert(&repo, "Child", Some(root)).await;

        assert!(repo.exists_by_parent_id(root).await.unwrap());
        assert!(!repo.exists_by_parent_id(child).await.unwrap());

        assert!(repo.delete_by_id(child).await.unwrap());
        assert!(!repo.delete_by_id(child).await.unwrap());
        assert!(!repo.exists_by_parent_id(root).await.unwrap());
        assert_eq!(repo.len().await, 1);
    }
}
