//! Order commands.

use common::ProductId;
use serde::Deserialize;

use super::{OrderError, ShippingInfo};

/// Command to place an order for one product.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrder {
    pub product_id: ProductId,
    pub quantity: u32,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub shipping_zip_code: String,
    pub shipping_address: String,
    #[serde(default)]
    pub request_message: Option<String>,
}

impl PlaceOrder {
    /// Creates a command with empty shipping fields; fill them with
    /// [`recipient`](Self::recipient) and [`ship_to`](Self::ship_to).
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
            recipient_name: String::new(),
            recipient_phone: String::new(),
            shipping_zip_code: String::new(),
            shipping_address: String::new(),
            request_message: None,
        }
    }

    pub fn recipient(mut self, name: impl Into<String>, phone: impl Into<String>) -> Self {
        self.recipient_name = name.into();
        self.recipient_phone = phone.into();
        self
    }

    pub fn ship_to(mut self, zip_code: impl Into<String>, address: impl Into<String>) -> Self {
        self.shipping_zip_code = zip_code.into();
        self.shipping_address = address.into();
        self
    }

    pub fn request_message(mut self, message: impl Into<String>) -> Self {
        self.request_message = Some(message.into());
        self
    }

    /// Validates the shipping fields.
    pub fn shipping(&self) -> Result<ShippingInfo, OrderError> {
        ShippingInfo::new(
            &self.recipient_name,
            &self.recipient_phone,
            &self.shipping_zip_code,
            &self.shipping_address,
            self.request_message.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_without_request_message() {
        let cmd: PlaceOrder = serde_json::from_str(
            r#"{
                "product_id": 4,
                "quantity": 2,
                "recipient_name": "홍길동",
                "recipient_phone": "010-1234-5678",
                "shipping_zip_code": "06236",
                "shipping_address": "서울"
            }"#,
        )
        .unwrap();
        assert_eq!(cmd.product_id, ProductId::new(4).unwrap());
        assert!(cmd.request_message.is_none());
        assert!(cmd.shipping().is_ok());
    }

    #[test]
    fn unfilled_shipping_is_rejected() {
        let cmd = PlaceOrder::new(ProductId::new(1).unwrap(), 1);
        assert!(cmd.shipping().is_err());
    }
}
