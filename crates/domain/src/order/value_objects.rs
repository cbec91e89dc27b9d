//! Value objects for the order domain.

use serde::{Deserialize, Serialize};

use super::OrderError;
use crate::text;

pub const MAX_RECIPIENT_NAME_LEN: usize = 50;
pub const MAX_ZIP_CODE_LEN: usize = 10;
pub const MAX_ADDRESS_LEN: usize = 200;
pub const MAX_REQUEST_MESSAGE_LEN: usize = 200;

const PHONE_LEN: std::ops::RangeInclusive<usize> = 9..=20;

/// Where and to whom an order is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    recipient_name: String,
    recipient_phone: String,
    zip_code: String,
    address: String,
    request_message: Option<String>,
}

impl ShippingInfo {
    /// Validates and trims every field. A blank request message is stored as
    /// `None`.
    pub fn new(
        recipient_name: &str,
        recipient_phone: &str,
        zip_code: &str,
        address: &str,
        request_message: Option<&str>,
    ) -> Result<Self, OrderError> {
        let phone = recipient_phone.trim();
        let phone_ok = PHONE_LEN.contains(&phone.len())
            && phone.chars().all(|c| c.is_ascii_digit() || c == '-');
        if !phone_ok {
            return Err(OrderError::InvalidPhone {
                phone: phone.to_string(),
            });
        }

        Ok(Self {
            recipient_name: required("recipient_name", recipient_name, MAX_RECIPIENT_NAME_LEN)?,
            recipient_phone: phone.to_string(),
            zip_code: required("shipping_zip_code", zip_code, MAX_ZIP_CODE_LEN)?,
            address: required("shipping_address", address, MAX_ADDRESS_LEN)?,
            request_message: match request_message.and_then(text::non_blank) {
                Some(message) => Some(bounded("request_message", message, MAX_REQUEST_MESSAGE_LEN)?),
                None => None,
            },
        })
    }

    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    pub fn recipient_phone(&self) -> &str {
        &self.recipient_phone
    }

    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn request_message(&self) -> Option<&str> {
        self.request_message.as_deref()
    }
}

fn required(field: &'static str, value: &str, max: usize) -> Result<String, OrderError> {
    let trimmed = text::non_blank(value).ok_or(OrderError::FieldRequired { field })?;
    bounded(field, trimmed, max)
}

fn bounded(field: &'static str, value: &str, max: usize) -> Result<String, OrderError> {
    let actual = text::char_len(value);
    if actual > max {
        return Err(OrderError::FieldTooLong { field, max, actual });
    }
    Ok(value.to_string())
}
