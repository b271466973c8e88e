use async_trait::async_trait;

use crate::domain::cart::authority::CartContext;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::mutation::CartMutation;
use crate::domain::cart::value_objects::ProductSnapshot;

pub struct AddCartItemParams {
    pub context: CartContext,
    pub product: ProductSnapshot,
}

#[async_trait]
pub trait AddCartItemUseCase: Send + Sync {
    async fn execute(&self, params: AddCartItemParams) -> Result<CartMutation, CartError>;
}
