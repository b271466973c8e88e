use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::domain::cart::model::LineItem;
use crate::domain::cart::value_objects::{Money, ProductId, Quantity};

use super::errors::OrderError;

const MIN_NAME_LEN: usize = 2;
const MIN_ADDRESS_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Contact and shipping details typed at checkout. Stored as given, apart
/// from trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub full_name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CustomerDetails {
    pub fn validated(self) -> Result<Self, OrderError> {
        let full_name = self.full_name.trim().to_string();
        if full_name.chars().count() < MIN_NAME_LEN {
            return Err(OrderError::CustomerNameTooShort);
        }
        let address = self.address.trim().to_string();
        if address.chars().count() < MIN_ADDRESS_LEN {
            return Err(OrderError::AddressTooShort);
        }
        Ok(Self {
            full_name,
            address,
            phone: non_blank(self.phone),
            notes: non_blank(self.notes),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A line item frozen at placement time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemSnapshot {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    pub quantity: Quantity,
    #[serde(default)]
    pub image: Option<String>,
}

impl OrderItemSnapshot {
    pub fn subtotal(&self) -> Money {
        self.price.times(self.quantity)
    }
}

impl From<&LineItem> for OrderItemSnapshot {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product.id.clone(),
            name: item.product.name.clone(),
            price: item.product.price.clone(),
            quantity: item.quantity,
            image: item.product.image.clone(),
        }
    }
}
