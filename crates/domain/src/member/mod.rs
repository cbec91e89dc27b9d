//! Members: registration, status and role, plus the identity boundary the
//! order service consumes.

mod aggregate;
mod directory;
mod repository;
mod service;
mod state;

pub use aggregate::{MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PHONE_LEN, Member};
pub use directory::{MemberDirectory, MemberProfile};
pub use repository::{InMemoryMemberRepository, MemberRepository};
pub use service::MemberService;
pub use state::{MemberRole, MemberStatus};

use common::MemberId;
use thiserror::Error;

use crate::error::ErrorKind;

/// Errors that can occur during member operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemberError {
    /// Member does not exist.
    #[error("Member not found: {0}")]
    NotFound(MemberId),

    /// Another member is registered with this email.
    #[error("Email already registered: {email}")]
    DuplicateEmail { email: String },

    #[error("Email is required")]
    EmailRequired,

    /// Email is not of the form `local@domain`.
    #[error("Invalid email address: {email}")]
    InvalidEmail { email: String },

    #[error("Email must be at most {max} characters (got {actual})")]
    EmailTooLong { max: usize, actual: usize },

    #[error("Member name is required")]
    NameRequired,

    #[error("Member name must be at most {max} characters (got {actual})")]
    NameTooLong { max: usize, actual: usize },

    #[error("Phone number is required")]
    PhoneRequired,

    /// Phone contains characters other than digits, `+`, `-` or spaces, or
    /// is too long.
    #[error("Invalid phone number: {phone}")]
    InvalidPhone { phone: String },
}

impl MemberError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MemberError::NotFound(_) => ErrorKind::NotFound,
            MemberError::DuplicateEmail { .. } => ErrorKind::Conflict,
            MemberError::EmailRequired
            | MemberError::InvalidEmail { .. }
            | MemberError::EmailTooLong { .. }
            | MemberError::NameRequired
            | MemberError::NameTooLong { .. }
            | MemberError::PhoneRequired
            | MemberError::InvalidPhone { .. } => ErrorKind::BadRequest,
        }
    }
}
