//! Category tree: entity, repository, and service.

mod aggregate;
mod repository;
mod service;
mod state;

pub use aggregate::{Category, MAX_NAME_LEN};
pub use repository::{CategoryRepository, InMemoryCategoryRepository};
pub use service::{CategoryService, CategoryUpdate, PinnedCategory};
pub use state::CategoryStatus;

use common::CategoryId;
use thiserror::Error;

use crate::error::ErrorKind;

/// Errors that can occur during category operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    /// Name is missing or blank.
    #[error("Category name is required")]
    NameRequired,

    /// Name exceeds the length limit.
    #[error("Category name must be at most {max} characters (got {actual})")]
    NameTooLong { max: usize, actual: usize },

    /// Another category already uses this name (case/whitespace-insensitive).
    #[error("Category name already exists: {name}")]
    DuplicateName { name: String },

    /// Category does not exist.
    #[error("Category not found: {0}")]
    NotFound(CategoryId),

    /// Requested parent does not exist.
    #[error("Parent category not found: {0}")]
    ParentNotFound(CategoryId),

    /// A category cannot be its own parent.
    #[error("Category {0} cannot be its own parent")]
    SelfParent(CategoryId),

    /// Re-parenting would close a loop in the tree.
    #[error("Moving category {category_id} under {parent_id} would create a cycle")]
    Cycle {
        category_id: CategoryId,
        parent_id: CategoryId,
    },

    /// Deletion blocked by child categories.
    #[error("Category {0} has child categories and cannot be deleted")]
    HasChildren(CategoryId),

    /// Deletion blocked by products referencing the category.
    #[error("Category {0} is referenced by products and cannot be deleted")]
    HasProducts(CategoryId),
}

impl CategoryError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CategoryError::NameRequired
            | CategoryError::NameTooLong { .. }
            | CategoryError::SelfParent(_) => ErrorKind::BadRequest,
            CategoryError::NotFound(_) | CategoryError::ParentNotFound(_) => ErrorKind::NotFound,
            CategoryError::DuplicateName { .. }
            | CategoryError::Cycle { .. }
            | CategoryError::HasChildren(_)
            | CategoryError::HasProducts(_) => ErrorKind::Conflict,
        }
    }
}
