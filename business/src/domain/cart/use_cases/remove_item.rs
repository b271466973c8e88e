use async_trait::async_trait;

use crate::domain::cart::authority::CartContext;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::mutation::CartMutation;
use crate::domain::cart::value_objects::ProductId;

pub struct RemoveCartItemParams {
    pub context: CartContext,
    pub product_id: ProductId,
}

#[async_trait]
pub trait RemoveCartItemUseCase: Send + Sync {
    async fn execute(&self, params: RemoveCartItemParams) -> Result<CartMutation, CartError>;
}
