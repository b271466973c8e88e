use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::authority::{CartAuthority, CartContext, CartSummary};
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::RemoteCartStore;
use crate::domain::cart::subscription::CartSubscription;
use crate::domain::errors::RepositoryError;

pub struct WatchCartParams {
    pub context: CartContext,
}

/// Live view of a remote cart: the current state first, then a fresh
/// summary after every change from any session.
pub struct CartWatch {
    store: Arc<dyn RemoteCartStore>,
    subscription: CartSubscription,
    primed: bool,
}

impl CartWatch {
    pub fn new(store: Arc<dyn RemoteCartStore>, subscription: CartSubscription) -> Self {
        Self {
            store,
            subscription,
            primed: false,
        }
    }

    /// `None` once the change feed is closed.
    pub async fn next(&mut self) -> Option<Result<CartSummary, RepositoryError>> {
        if self.primed && !self.subscription.changed().await {
            return None;
        }
        self.primed = true;

        let user_id = self.subscription.user_id().clone();
        let result = self.store.get_all(&user_id).await.map(|items| {
            CartSummary::of(CartAuthority::Remote(user_id), &Cart::from_items(items))
        });
        Some(result)
    }
}

#[async_trait]
pub trait WatchCartUseCase: Send + Sync {
    async fn execute(&self, params: WatchCartParams) -> Result<CartWatch, CartError>;
}
