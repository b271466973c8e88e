use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use business::domain::cart::model::LineItem;
use business::domain::cart::value_objects::{Money, ProductId, ProductSnapshot, Quantity};
use business::domain::errors::RepositoryError;

#[derive(Debug, Clone, FromRow)]
pub struct CartItemEntity {
    pub user_id: String,
    pub product_id: String,
    pub name: String,
    pub price: BigDecimal,
    pub quantity: i32,
    pub image: Option<String>,
    pub category: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl CartItemEntity {
    pub fn into_domain(self) -> Result<LineItem, RepositoryError> {
        let id = ProductId::new(self.product_id).map_err(|_| RepositoryError::InvalidRecord)?;
        let price = Money::new(self.price).map_err(|_| RepositoryError::InvalidRecord)?;
        let quantity =
            Quantity::new(i64::from(self.quantity)).ok_or(RepositoryError::InvalidRecord)?;
        let product = ProductSnapshot::new(id, self.name, price, self.image, self.category)
            .map_err(|_| RepositoryError::InvalidRecord)?;

        Ok(LineItem::new(product, quantity))
    }
}
