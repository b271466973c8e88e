use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::stores::CartStores;
use crate::domain::cart::authority::CartSummary;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::use_cases::get::{GetCartParams, GetCartUseCase};
use crate::domain::logger::Logger;

pub struct GetCartUseCaseImpl {
    pub stores: CartStores,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetCartUseCase for GetCartUseCaseImpl {
    async fn execute(&self, params: GetCartParams) -> Result<CartSummary, CartError> {
        let authority = params.context.authority();
        let cart = self.stores.load(&authority).await.map_err(|e| {
            self.logger
                .error(&format!("Failed to load {} cart: {}", authority, e));
            e
        })?;

        self.logger.debug(&format!(
            "Loaded {} cart with {} lines",
            authority,
            cart.len()
        ));
        Ok(CartSummary::of(authority, &cart))
    }
}
