use async_trait::async_trait;

use crate::domain::cart::authority::CartContext;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::reconciliation::MergeOutcome;

pub struct MergeLocalCartParams {
    pub context: CartContext,
}

#[async_trait]
pub trait MergeLocalCartUseCase: Send + Sync {
    async fn execute(&self, params: MergeLocalCartParams) -> Result<MergeOutcome, CartError>;
}
