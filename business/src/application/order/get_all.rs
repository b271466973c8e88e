use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::get_all::{GetOrdersParams, GetOrdersUseCase};

pub struct GetOrdersUseCaseImpl {
    pub repository: Arc<dyn OrderRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetOrdersUseCase for GetOrdersUseCaseImpl {
    async fn execute(&self, params: GetOrdersParams) -> Result<Vec<Order>, OrderError> {
        let account = params.identity.verified().ok_or(OrderError::NotAuthenticated)?;

        let mut orders = self.repository.get_all(&account.user_id).await?;
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));

        self.logger.debug(&format!(
            "Fetched {} orders for {}",
            orders.len(),
            account.user_id
        ));
        Ok(orders)
    }
}
