//! Member entity.

use common::MemberId;
use serde::{Deserialize, Serialize};

use super::{MemberError, MemberRole, MemberStatus};
use crate::text;

pub const MAX_EMAIL_LEN: usize = 320;
pub const MAX_NAME_LEN: usize = 50;
pub const MAX_PHONE_LEN: usize = 20;

/// A registered shopper or administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    email: String,
    name: String,
    phone: String,
    role: MemberRole,
    status: MemberStatus,
}

impl Member {
    /// Creates an ACTIVE member with the USER role.
    pub fn register(
        id: MemberId,
        email: &str,
        name: &str,
        phone: &str,
    ) -> Result<Self, MemberError> {
        Ok(Self {
            id,
            email: Self::normalize_email(email)?,
            name: validate_name(name)?,
            phone: validate_phone(phone)?,
            role: MemberRole::default(),
            status: MemberStatus::default(),
        })
    }

    /// Trims and lowercases an email, rejecting anything that is not
    /// `local@domain`.
    pub fn normalize_email(email: &str) -> Result<String, MemberError> {
        let trimmed = text::non_blank(email).ok_or(MemberError::EmailRequired)?;
        let actual = text::char_len(trimmed);
        if actual > MAX_EMAIL_LEN {
            return Err(MemberError::EmailTooLong {
                max: MAX_EMAIL_LEN,
                actual,
            });
        }

        let email = trimmed.to_lowercase();
        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !email.chars().any(char::is_whitespace)
            }
            None => false,
        };
        if !valid {
            return Err(MemberError::InvalidEmail { email });
        }
        Ok(email)
    }

    /// Checks name and phone the way [`register`](Self::register) does.
    pub fn validate_profile(name: &str, phone: &str) -> Result<(), MemberError> {
        validate_name(name)?;
        validate_phone(phone)?;
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, MemberError> {
    let trimmed = text::non_blank(name).ok_or(MemberError::NameRequired)?;
    let actual = text::char_len(trimmed);
    if actual > MAX_NAME_LEN {
        return Err(MemberError::NameTooLong {
            max: MAX_NAME_LEN,
            actual,
        });
    }
    Ok(trimmed.to_string())
}

fn validate_phone(phone: &str) -> Result<String, MemberError> {
    let trimmed = text::non_blank(phone).ok_or(MemberError::PhoneRequired)?;
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ');
    if text::char_len(trimmed) > MAX_PHONE_LEN || !trimmed.chars().all(allowed) {
        return Err(MemberError::InvalidPhone {
            phone: trimmed.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

// Query methods
impl Member {
    pub fn id(&self) -> MemberId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn role(&self) -> MemberRole {
        self.role
    }

    pub fn status(&self) -> MemberStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

// Mutations
impl Member {
    /// Idempotent.
    pub fn change_status(&mut self, status: MemberStatus) {
        self.status = status;
    }

    pub fn change_role(&mut self, role: MemberRole) {
        self.role = role;
    }

    /// Replaces whichever of name and phone is supplied. Both are validated
    /// before either is applied.
    pub fn update_profile(
        &mut self,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<(), MemberError> {
        let name = name.map(validate_name).transpose()?;
        let phone = phone.map(validate_phone).transpose()?;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(phone) = phone {
            self.phone = phone;
        }
        Ok(())
    }

    /// Self-withdrawal. The record is kept, only marked INACTIVE.
    pub fn deactivate(&mut self) {
        self.status = MemberStatus::Inactive;
    }
}
