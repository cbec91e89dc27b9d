//! Domain error types.

use thiserror::Error;

use crate::category::CategoryError;
use crate::member::MemberError;
use crate::order::OrderError;
use crate::product::ProductError;

/// Classification of a domain failure, used by the boundary layer to pick a
/// client-visible response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing input. Never retried.
    BadRequest,
    /// A referenced id does not resolve.
    NotFound,
    /// An invariant would be violated.
    Conflict,
    /// No caller identity.
    Unauthorized,
    /// Caller identity present but not entitled.
    Forbidden,
    /// Unclassified failure; reported generically.
    Internal,
}

impl ErrorKind {
    /// Returns the stable error code string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure reported by a repository implementation.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backing store rejected or could not complete the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Category(#[from] CategoryError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Member(#[from] MemberError),

    #[error(transparent)]
    Order(#[from] OrderError),

    /// A repository failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Category(e) => e.kind(),
            DomainError::Product(e) => e.kind(),
            DomainError::Member(e) => e.kind(),
            DomainError::Order(e) => e.kind(),
            DomainError::Store(_) => ErrorKind::Internal,
        }
    }
}

/// Convenience type alias for domain results.
pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use common::CategoryId;

    use super::*;

    #[test]
    fn store_errors_are_internal() {
        let err = DomainError::from(StoreError::Unavailable("disk gone".into()));
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.kind().as_str(), "INTERNAL_ERROR");
    }

    #[test]
    fn wrapped_errors_keep_their_message() {
        let id = CategoryId::new(3).unwrap();
        let err = DomainError::from(CategoryError::HasChildren(id));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.to_string(), CategoryError::HasChildren(id).to_string());
    }
}
