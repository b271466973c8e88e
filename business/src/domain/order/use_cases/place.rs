use async_trait::async_trait;

use crate::domain::auth::identity::AuthIdentity;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;
use crate::domain::order::value_objects::CustomerDetails;

pub struct PlaceOrderParams {
    pub identity: AuthIdentity,
    pub customer_details: CustomerDetails,
}

#[async_trait]
pub trait PlaceOrderUseCase: Send + Sync {
    async fn execute(&self, params: PlaceOrderParams) -> Result<Order, OrderError>;
}
