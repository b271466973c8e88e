use async_trait::async_trait;

use crate::domain::cart::authority::CartContext;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::mutation::CartMutation;

pub struct ClearCartParams {
    pub context: CartContext,
}

#[async_trait]
pub trait ClearCartUseCase: Send + Sync {
    async fn execute(&self, params: ClearCartParams) -> Result<CartMutation, CartError>;
}
