use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::get_by_id::{GetOrderByIdParams, GetOrderByIdUseCase};

pub struct GetOrderByIdUseCaseImpl {
    pub repository: Arc<dyn OrderRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetOrderByIdUseCase for GetOrderByIdUseCaseImpl {
    async fn execute(&self, params: GetOrderByIdParams) -> Result<Order, OrderError> {
        let account = params.identity.verified().ok_or(OrderError::NotAuthenticated)?;

        self.repository
            .get_by_id(&account.user_id, params.id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => {
                    self.logger.debug(&format!(
                        "Order {} not found for {}",
                        params.id, account.user_id
                    ));
                    OrderError::NotFound
                }
                other => OrderError::Repository(other),
            })
    }
}
