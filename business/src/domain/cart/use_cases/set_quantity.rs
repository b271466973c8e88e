use async_trait::async_trait;

use crate::domain::cart::authority::CartContext;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::mutation::CartMutation;
use crate::domain::cart::value_objects::ProductId;

pub struct SetCartItemQuantityParams {
    pub context: CartContext,
    pub product_id: ProductId,
    /// Zero or negative removes the item.
    pub quantity: i64,
}

#[async_trait]
pub trait SetCartItemQuantityUseCase: Send + Sync {
    async fn execute(&self, params: SetCartItemQuantityParams)
    -> Result<CartMutation, CartError>;
}
