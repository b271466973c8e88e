use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::stores::{CartStores, settle};
use crate::domain::cart::authority::{CartAuthority, CartSummary};
use crate::domain::cart::errors::CartError;
use crate::domain::cart::mutation::{CartMutation, CartMutationKind};
use crate::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use crate::domain::logger::Logger;

pub struct ClearCartUseCaseImpl {
    pub stores: CartStores,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ClearCartUseCase for ClearCartUseCaseImpl {
    async fn execute(&self, params: ClearCartParams) -> Result<CartMutation, CartError> {
        let authority = params.context.authority();
        self.logger.info(&format!("Clearing {} cart", authority));

        let mut cart = self.stores.load(&authority).await?;
        let mutation =
            CartMutation::pending(CartMutationKind::Clear, CartSummary::of(authority.clone(), &cart));

        cart.clear();
        let write = match &authority {
            CartAuthority::Local(profile) => self.stores.local.remove(profile).await,
            CartAuthority::Remote(user_id) => {
                self.stores.remote.delete_all(user_id).await.map(|removed| {
                    self.logger
                        .debug(&format!("Deleted {} cart records of {}", removed, user_id));
                })
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::mutation::MutationState;
    use crate::test_support::{
        InMemoryLocalCartStore, InMemoryRemoteCartStore, anonymous_context, line_item,
        mock_logger, verified_context,
    };

    #[tokio::test]
    async fn should_empty_remote_cart() {
        let local = Arc::new(InMemoryLocalCartStore::default());
        let remote = Arc::new(InMemoryRemoteCartStore::default());
        remote.seed(
            "uid-1",
            vec![line_item("a", 1.0, 1), line_item("b", 2.0, 2)],
        );

        let use_case = ClearCartUseCaseImpl {
            stores: CartStores::new(local, remote.clone()),
            logger: mock_logger(),
        };

        let mutation = use_case
            .execute(ClearCartParams {
                context: verified_context("uid-1", 1),
            })
            .await
            .unwrap();

        assert!(mutation.is_committed());
        assert_eq!(mutation.summary.item_count, 0);
        assert!(remote.items("uid-1").is_empty());
    }

    #[tokio::test]
    async fn should_keep_local_cart_when_clear_fails() {
        let local = Arc::new(InMemoryLocalCartStore::default());
        let remote = Arc::new(InMemoryRemoteCartStore::default());
        let ctx = anonymous_context();
        local.seed(&ctx.profile, vec![line_item("a", 1.0, 4)]);
        local.fail_writes(true);

        let use_case = ClearCartUseCaseImpl {
            stores: CartStores::new(local.clone(), remote),
            logger: mock_logger(),
        };

        let mutation = use_case
            .execute(ClearCartParams {
                context: ctx.clone(),
            })
            .await
            .unwrap();

        assert!(matches!(mutation.state, MutationState::Failed { .. }));
        assert_eq!(mutation.summary.item_count, 4);
        assert_eq!(local.items(&ctx.profile).len(), 1);
    }
}
