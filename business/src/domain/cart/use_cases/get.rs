use async_trait::async_trait;

use crate::domain::cart::authority::{CartContext, CartSummary};
use crate::domain::cart::errors::CartError;

pub struct GetCartParams {
    pub context: CartContext,
}

#[async_trait]
pub trait GetCartUseCase: Send + Sync {
    async fn execute(&self, params: GetCartParams) -> Result<CartSummary, CartError>;
}
