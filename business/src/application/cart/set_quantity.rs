use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::stores::{CartStores, settle};
use crate::domain::cart::authority::{CartAuthority, CartSummary};
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::QuantityChange;
use crate::domain::cart::mutation::{CartMutation, CartMutationKind};
use crate::domain::cart::use_cases::set_quantity::{
    SetCartItemQuantityParams, SetCartItemQuantityUseCase,
};
use crate::domain::logger::Logger;

pub struct SetCartItemQuantityUseCaseImpl {
    pub stores: CartStores,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SetCartItemQuantityUseCase for SetCartItemQuantityUseCaseImpl {
    async fn execute(
        &self,
        params: SetCartItemQuantityParams,
    ) -> Result<CartMutation, CartError> {
        let authority = params.context.authority();
        self.logger.info(&format!(
            "Setting quantity of {} to {} in {} cart",
            params.product_id, params.quantity, authority
        ));

        let mut cart = self.stores.load(&authority).await?;
        let mutation = CartMutation::pending(
            CartMutationKind::SetQuantity {
                product_id: params.product_id.clone(),
                quantity: params.quantity,
            },
            CartSummary::of(authority.clone(), &cart),
        );

        let change = cart.set_quantity(&params.product_id, params.quantity)?;
        let write = match (change, &authority) {
            (QuantityChange::Absent, _) => {
                self.logger.debug(&format!(
                    "Product {} not in {} cart, nothing to update",
                    params.product_id, authority
                ));
                Ok(())
            }
            (_, CartAuthority::Local(profile)) => {
                self.stores.local.save(profile, cart.items()).await
            }
            (QuantityChange::Updated(quantity), CartAuthority::Remote(user_id)) => {
                self.stores
                    .remote
                    .update_quantity(user_id, &params.product_id, quantity)
                    .await
            }
            (QuantityChange::Removed, CartAuthority::Remote(user_id)) => {
                self.stores.remote.delete(user_id, &params.product_id).await
            }
        };

        Ok(settle(
            mutation,
            write,
            CartSummary::of(authority, &cart),
            self.logger.as_ref(),
        ))
    }
}
