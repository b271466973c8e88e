use std::sync::Arc;

use crate::domain::cart::authority::{CartAuthority, CartSummary};
use crate::domain::cart::model::Cart;
use crate::domain::cart::mutation::CartMutation;
use crate::domain::cart::repository::{LocalCartStore, RemoteCartStore};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;

/// Both cart stores, with reads routed to whichever one is authoritative.
#[derive(Clone)]
pub struct CartStores {
    pub local: Arc<dyn LocalCartStore>,
    pub remote: Arc<dyn RemoteCartStore>,
}

impl CartStores {
    pub fn new(local: Arc<dyn LocalCartStore>, remote: Arc<dyn RemoteCartStore>) -> Self {
        Self { local, remote }
    }

    pub async fn load(&self, authority: &CartAuthority) -> Result<Cart, RepositoryError> {
        let items = match authority {
            CartAuthority::Local(profile) => self.local.load(profile).await?,
            CartAuthority::Remote(user_id) => self.remote.get_all(user_id).await?,
        };
        Ok(Cart::from_items(items))
    }
}

/// Finishes a pending mutation from the result of its write. Failed writes
/// are logged and reported on the mutation, never retried.
pub(crate) fn settle(
    mutation: CartMutation,
    write: Result<(), RepositoryError>,
    after: CartSummary,
    logger: &dyn Logger,
) -> CartMutation {
    match write {
        Ok(()) => mutation.commit(after),
        Err(error) => {
            logger.error(&format!(
                "Cart mutation {} ({}) failed on {} cart: {}",
                mutation.id, mutation.kind, after.authority, error
            ));
            mutation.fail(&error)
        }
    }
}
