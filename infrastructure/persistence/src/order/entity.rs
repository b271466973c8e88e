use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use business::domain::cart::value_objects::Money;
use business::domain::errors::RepositoryError;
use business::domain::order::model::Order;
use business::domain::order::value_objects::{CustomerDetails, OrderItemSnapshot, OrderStatus};
use business::domain::shared::value_objects::UserId;

#[derive(Debug, FromRow)]
pub struct OrderEntity {
    pub id: Uuid,
    pub user_id: String,
    pub items: Json<Vec<OrderItemSnapshot>>,
    pub total_amount: BigDecimal,
    pub status: String,
    pub customer_details: Json<CustomerDetails>,
    pub order_date: DateTime<Utc>,
}

impl OrderEntity {
    pub fn into_domain(self) -> Result<Order, RepositoryError> {
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(|_| RepositoryError::InvalidRecord)?;
        let total_amount =
            Money::new(self.total_amount).map_err(|_| RepositoryError::InvalidRecord)?;

        Ok(Order {
            id: self.id,
            user_id: UserId::new(self.user_id),
            items: self.items.0,
            total_amount,
            status,
            customer_details: self.customer_details.0,
            order_date: self.order_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn entity(status: &str) -> OrderEntity {
        let items: Vec<OrderItemSnapshot> = serde_json::from_value(serde_json::json!([
            {
                "product_id": "x",
                "name": "Capulana",
                "price": "100.00",
                "quantity": 2,
                "image": null
            }
        ]))
        .unwrap();

        OrderEntity {
            id: Uuid::new_v4(),
            user_id: "uid-1".to_string(),
            items: Json(items),
            total_amount: BigDecimal::from_str("200.00").unwrap(),
            status: status.to_string(),
            customer_details: Json(CustomerDetails {
                full_name: "Ana".to_string(),
                address: "Rua da Sé 100, Maputo".to_string(),
                phone: None,
                notes: None,
            }),
            order_date: Utc::now(),
        }
    }

    #[test]
    fn should_map_row_to_order() {
        let order = entity("processing").into_domain().unwrap();

        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.items[0].quantity.get(), 2);
        assert_eq!(order.items[0].subtotal(), order.total_amount);
    }

    #[test]
    fn should_reject_unknown_status() {
        assert_eq!(
            entity("teleported").into_domain(),
            Err(RepositoryError::InvalidRecord)
        );
    }
}
