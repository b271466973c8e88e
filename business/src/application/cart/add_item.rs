use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::stores::{CartStores, settle};
use crate::domain::cart::authority::{CartAuthority, CartSummary};
use crate::domain::cart::errors::CartError;
use crate::domain::cart::mutation::{CartMutation, CartMutationKind};
use crate::domain::cart::use_cases::add_item::{AddCartItemParams, AddCartItemUseCase};
use crate::domain::logger::Logger;

pub struct AddCartItemUseCaseImpl {
    pub stores: CartStores,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl AddCartItemUseCase for AddCartItemUseCaseImpl {
    async fn execute(&self, params: AddCartItemParams) -> Result<CartMutation, CartError> {
        let authority = params.context.authority();
        self.logger.info(&format!(
            "Adding product {} to {} cart",
            params.product.id, authority
        ));

        let mut cart = self.stores.load(&authority).await?;
        let mutation = CartMutation::pending(
            CartMutationKind::AddItem(params.product.clone()),
            CartSummary::of(authority.clone(), &cart),
        );

        let item = cart.add_product(params.product).clone();
        let write = match &authority {
            CartAuthority::Local(profile) => self.stores.local.save(profile, cart.items()).await,
            CartAuthority::Remote(user_id) => self.stores.remote.save(user_id, &item).await,
        };

        Ok(settle(
            mutation,
            write,
            CartSummary::of(authority, &cart),
            self.logger.as_ref(),
        ))
    }
}
