use serde::{Deserialize, Serialize};

use business::domain::cart::model::LineItem;
use business::domain::cart::value_objects::{Money, ProductId, ProductSnapshot, Quantity};

/// One entry of the stored cart array, in the shape browsers already keep
/// under `bazar-pt-cart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCartItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl StoredCartItem {
    /// `None` for entries that could never have been written by a valid
    /// cart: blank ids or names, bad prices, quantities below one.
    pub fn into_domain(self) -> Option<LineItem> {
        let id = ProductId::new(self.id).ok()?;
        let price = Money::from_f64(self.price).ok()?;
        let quantity = Quantity::new(self.quantity)?;
        let image = self.images.into_iter().next();
        let product = ProductSnapshot::new(id, self.name, price, image, self.category).ok()?;
        Some(LineItem::new(product, quantity))
    }
}

impl From<&LineItem> for StoredCartItem {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id().to_string(),
            name: item.product.name.clone(),
            price: item.product.price.to_f64(),
            quantity: i64::from(item.quantity.get()),
            images: item.product.image.iter().cloned().collect(),
            category: item.product.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_read_browser_cart_entry() {
        let stored: StoredCartItem = serde_json::from_str(
            r#"{"id":"cap-1","name":"Capulana","description":"Tecido","price":350.5,"stock":4,"quantity":2,"images":["a.jpg","b.jpg"]}"#,
        )
        .unwrap();

        let item = stored.into_domain().unwrap();

        assert_eq!(item.id().as_str(), "cap-1");
        assert_eq!(item.quantity.get(), 2);
        assert_eq!(item.product.image.as_deref(), Some("a.jpg"));
        assert_eq!(item.subtotal(), Money::from_f64(701.0).unwrap());
    }

    #[test]
    fn should_drop_entry_with_zero_quantity() {
        let stored = StoredCartItem {
            id: "x".to_string(),
            name: "X".to_string(),
            price: 1.0,
            quantity: 0,
            images: vec![],
            category: None,
        };
        assert!(stored.into_domain().is_none());
    }
}
