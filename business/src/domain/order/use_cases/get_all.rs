use async_trait::async_trait;

use crate::domain::auth::identity::AuthIdentity;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;

pub struct GetOrdersParams {
    pub identity: AuthIdentity,
}

#[async_trait]
pub trait GetOrdersUseCase: Send + Sync {
    async fn execute(&self, params: GetOrdersParams) -> Result<Vec<Order>, OrderError>;
}
