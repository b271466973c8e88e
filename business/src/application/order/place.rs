use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::identity::AuthIdentity;
use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::RemoteCartStore;
use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::{NewOrder, Order};
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::place::{PlaceOrderParams, PlaceOrderUseCase};

/// validate, snapshot, create order, clear cart. The last two steps are not
/// one transaction: a failed clear leaves the order in place and the items
/// in the cart.
pub struct PlaceOrderUseCaseImpl {
    pub orders: Arc<dyn OrderRepository>,
    pub cart: Arc<dyn RemoteCartStore>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl PlaceOrderUseCase for PlaceOrderUseCaseImpl {
    async fn execute(&self, params: PlaceOrderParams) -> Result<Order, OrderError> {
        let account = match &params.identity {
            AuthIdentity::Verified(account) => account,
            AuthIdentity::Anonymous { user_id } => {
                self.logger
                    .warn(&format!("Anonymous user {} tried to check out", user_id));
                return Err(OrderError::NotAuthenticated);
            }
        };
        if !account.can_checkout() {
            return Err(OrderError::EmailNotVerified);
        }
        let customer_details = params.customer_details.validated()?;

        let cart = Cart::from_items(self.cart.get_all(&account.user_id).await?);
        let new_order = NewOrder::from_cart(account.user_id.clone(), &cart, customer_details)?;

        let order = self.orders.create(&new_order).await.map_err(|e| {
            self.logger.error(&format!(
                "Failed to create order for {}: {}",
                account.user_id, e
            ));
            e
        })?;
        self.logger.info(&format!(
            "Order {} placed by {} ({} items, {})",
            order.id,
            order.user_id,
            order.items.len(),
            order.total_amount
        ));

        if let Err(e) = self.cart.delete_all(&account.user_id).await {
            self.logger.error(&format!(
                "Order {} created but cart of {} not cleared: {}",
                order.id, account.user_id, e
            ));
            return Err(OrderError::CartNotCleared { order_id: order.id });
        }

        Ok(order)
    }
}
