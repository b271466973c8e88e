use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::UserId;

use super::model::{NewOrder, Order};

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Stores the order and returns it with the store-assigned timestamp.
    async fn create(&self, order: &NewOrder) -> Result<Order, RepositoryError>;
    /// Newest first.
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError>;
    async fn get_by_id(&self, user_id: &UserId, id: Uuid) -> Result<Order, RepositoryError>;
}
