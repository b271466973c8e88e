use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::auth::identity::AuthIdentity;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;

pub struct GetOrderByIdParams {
    pub identity: AuthIdentity,
    pub id: Uuid,
}

#[async_trait]
pub trait GetOrderByIdUseCase: Send + Sync {
    async fn execute(&self, params: GetOrderByIdParams) -> Result<Order, OrderError>;
}
