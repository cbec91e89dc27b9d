//! Category entity.

use common::CategoryId;
use serde::{Deserialize, Serialize};

use super::{CategoryError, CategoryStatus};
use crate::text;

/// Maximum display name length, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// A node in the catalog tree.
///
/// `parent_id` is a weak reference: it names another category but does not
/// own it. The tree shape (no self-parent, no cycles) is enforced by
/// [`CategoryService`](super::CategoryService), which can see the other nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    name_key: String,
    parent_id: Option<CategoryId>,
    status: CategoryStatus,
}

impl Category {
    /// Creates an active category after validating the name.
    pub fn create(
        id: CategoryId,
        name: &str,
        parent_id: Option<CategoryId>,
    ) -> Result<Self, CategoryError> {
        let (name, name_key) = Self::validate_name(name)?;
        if parent_id == Some(id) {
            return Err(CategoryError::SelfParent(id));
        }

        Ok(Self {
            id,
            name,
            name_key,
            parent_id,
            status: CategoryStatus::Active,
        })
    }

    /// Lowercase, trimmed form of a display name used for uniqueness checks.
    pub fn normalize_key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Validates a display name, returning it trimmed along with its key.
    pub fn validate_name(name: &str) -> Result<(String, String), CategoryError> {
        let trimmed = text::non_blank(name).ok_or(CategoryError::NameRequired)?;
        let actual = text::char_len(trimmed);
        if actual > MAX_NAME_LEN {
            return Err(CategoryError::NameTooLong {
                max: MAX_NAME_LEN,
                actual,
            });
        }
        Ok((trimmed.to_string(), Self::normalize_key(trimmed)))
    }
}

// Query methods
impl Category {
    pub fn id(&self) -> CategoryId {
        self.id
    }

    /// Trimmed display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_key(&self) -> &str {
        &self.name_key
    }

    pub fn parent_id(&self) -> Option<CategoryId> {
        self.parent_id
    }

    pub fn status(&self) -> CategoryStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

// Mutations
impl Category {
    /// Replaces the display name. Uniqueness is the caller's concern.
    pub fn rename(&mut self, name: &str) -> Result<(), CategoryError> {
        let (name, name_key) = Self::validate_name(name)?;
        self.name = name;
        self.name_key = name_key;
        Ok(())
    }

    /// Points this category at a new parent. Only the self-parent rule can be
    /// checked here; existence and cycles need the rest of the tree.
    pub fn change_parent(&mut self, parent_id: CategoryId) -> Result<(), CategoryError> {
        if parent_id == self.id {
            return Err(CategoryError::SelfParent(self.id));
        }
        self.parent_id = Some(parent_id);
        Ok(())
    }

    /// Sets the visibility status. Idempotent.
    pub fn set_status(&mut self, status: CategoryStatus) {
        self.status = status;
    }

    pub fn activate(&mut self) {
        self.set_status(CategoryStatus::Active);
    }

    pub fn deactivate(&mut self) {
        self.set_status(CategoryStatus::Inactive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> CategoryId {
        CategoryId::new(raw).unwrap()
    }

    #[test]
    fn create_trims_name_and_derives_key() {
        let category = Category::create(id(1), "  Electronics ", None).unwrap();
        assert_eq!(category.name(), "Electronics");
        assert_eq!(category.name_key(), "electronics");
        assert_eq!(category.status(), CategoryStatus::Active);
        assert_eq!(category.parent_id(), None);
    }

    #[test]
    fn create_rejects_blank_name() {
        assert_eq!(
            Category::create(id(1), "   ", None),
            Err(CategoryError::NameRequired)
        );
    }

    #[test]
    fn name_limit_counts_characters() {
        let fifty = "가".repeat(50);
        assert!(Category::create(id(1), &fifty, None).is_ok());

        let fifty_one = "가".repeat(51);
        assert_eq!(
            Category::create(id(1), &fifty_one, None),
            Err(CategoryError::NameTooLong {
                max: 50,
                actual: 51
            })
        );
    }

    #[test]
    fn change_parent_rejects_self() {
        let mut category = Category::create(id(4), "Books", None).unwrap();
        assert_eq!(
            category.change_parent(id(4)),
            Err(CategoryError::SelfParent(id(4)))
        );
        assert_eq!(category.parent_id(), None);

        category.change_parent(id(2)).unwrap();
        assert_eq!(category.parent_id(), Some(id(2)));
    }

    #[test]
    fn rename_failure_leaves_name_untouched() {
        let mut category = Category::create(id(1), "Books", None).unwrap();
        assert!(category.rename("").is_err());
        assert_eq!(category.name(), "Books");

        category.rename(" Comics ").unwrap();
        assert_eq!(category.name(), "Comics");
        assert_eq!(category.name_key(), "comics");
    }

    #[test]
    fn status_toggle_is_idempotent() {
        let mut category = Category::create(id(1), "Books", None).unwrap();
        category.deactivate();
        category.deactivate();
        assert!(!category.is_active());
        category.activate();
        assert!(category.is_active());
    }
}
