use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::order::model::{NewOrder, Order};
use business::domain::order::repository::OrderRepository;
use business::domain::shared::value_objects::UserId;

use super::entity::OrderEntity;

pub struct OrderRepositoryPostgres {
    pool: PgPool,
}

impl OrderRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for OrderRepositoryPostgres {
    async fn create(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
        let order_date = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"INSERT INTO orders (id, user_id, items, total_amount, status, customer_details)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING order_date"#,
        )
        .bind(order.id)
        .bind(order.user_id.as_str())
        .bind(Json(&order.items))
        .bind(order.total_amount.amount())
        .bind(order.status.to_string())
        .bind(Json(&order.customer_details))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert order {}: {}", order.id, e);
            RepositoryError::DatabaseError
        })?;

        Ok(order.clone().placed_at(order_date))
    }

    async fn get_all(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        let entities = sqlx::query_as::<_, OrderEntity>(
            "SELECT id, user_id, items, total_amount, status, customer_details, order_date FROM orders WHERE user_id = $1 ORDER BY order_date DESC",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        entities.into_iter().map(OrderEntity::into_domain).collect()
    }

    async fn get_by_id(&self, user_id: &UserId, id: Uuid) -> Result<Order, RepositoryError> {
        let entity = sqlx::query_as::<_, OrderEntity>(
            "SELECT id, user_id, items, total_amount, status, customer_details, order_date FROM orders WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?
        .ok_or(RepositoryError::NotFound)?;

        entity.into_domain()
    }
}
