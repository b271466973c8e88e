use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::stores::{CartStores, settle};
use crate::domain::cart::authority::{CartAuthority, CartSummary};
use crate::domain::cart::errors::CartError;
use crate::domain::cart::mutation::{CartMutation, CartMutationKind};
use crate::domain::cart::use_cases::remove_item::{RemoveCartItemParams, RemoveCartItemUseCase};
use crate::domain::logger::Logger;

pub struct RemoveCartItemUseCaseImpl {
    pub stores: CartStores,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RemoveCartItemUseCase for RemoveCartItemUseCaseImpl {
    async fn execute(&self, params: RemoveCartItemParams) -> Result<CartMutation, CartError> {
        let authority = params.context.authority();
        self.logger.info(&format!(
            "Removing product {} from {} cart",
            params.product_id, authority
        ));

        let mut cart = self.stores.load(&authority).await?;
        let mutation = CartMutation::pending(
            CartMutationKind::RemoveItem(params.product_id.clone()),
            CartSummary::of(authority.clone(), &cart),
        );

        let write = match cart.remove(&params.product_id) {
            None => Ok(()),
            Some(_) => match &authority {
                CartAuthority::Local(profile) => {
                    self.stores.local.save(profile, cart.items()).await
                }
                CartAuthority::Remote(user_id) => {
                    self.stores.remote.delete(user_id, &params.product_id).await
                }
            },
        };

        Ok(settle(
            mutation,
            write,
            CartSummary::of(authority, &cart),
            self.logger.as_ref(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::value_objects::ProductId;
    use crate::test_support::{
        InMemoryLocalCartStore, InMemoryRemoteCartStore, anonymous_context, line_item,
        mock_logger, verified_context,
    };

    #[tokio::test]
    async fn should_remove_line_from_local_cart() {
        let local = Arc::new(InMemoryLocalCartStore::default());
        let remote = Arc::new(InMemoryRemoteCartStore::default());
        let ctx = anonymous_context();
        local.seed(
            &ctx.profile,
            vec![line_item("a", 10.0, 2), line_item("b", 5.0, 1)],
        );

        let use_case = RemoveCartItemUseCaseImpl {
            stores: CartStores::new(local.clone(), remote),
            logger: mock_logger(),
        };

        let mutation = use_case
            .execute(RemoveCartItemParams {
                context: ctx.clone(),
                product_id: ProductId::new("a").unwrap(),
            })
            .await
            .unwrap();

        assert!(mutation.is_committed());
        assert_eq!(mutation.summary.item_count, 1);
        assert_eq!(local.items(&ctx.profile).len(), 1);
    }

    #[tokio::test]
    async fn should_commit_without_write_when_product_absent() {
        let local = Arc::new(InMemoryLocalCartStore::default());
        let remote = Arc::new(InMemoryRemoteCartStore::default());
        remote.seed("uid-1", vec![line_item("a", 10.0, 1)]);
        remote.fail_writes(true);

        let use_case = RemoveCartItemUseCaseImpl {
            stores: CartStores::new(local, remote),
            logger: mock_logger(),
        };

        let mutation = use_case
            .execute(RemoveCartItemParams {
                context: verified_context("uid-1", 1),
                product_id: ProductId::new("missing").unwrap(),
            })
            .await
            .unwrap();

        assert!(mutation.is_committed());
        assert_eq!(mutation.summary.items.len(), 1);
    }
}
