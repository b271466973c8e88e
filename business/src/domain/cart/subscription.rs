use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use crate::domain::shared::value_objects::UserId;

/// A committed write to some user's remote cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartChange {
    pub user_id: UserId,
}

/// Fan-out of remote cart changes to every open subscription.
#[derive(Debug, Clone)]
pub struct CartChangeHub {
    sender: broadcast::Sender<CartChange>,
}

impl CartChangeHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Returns the number of subscriptions that will see the change.
    pub fn publish(&self, user_id: &UserId) -> usize {
        self.sender
            .send(CartChange {
                user_id: user_id.clone(),
            })
            .unwrap_or(0)
    }

    pub fn subscribe(&self, user_id: &UserId) -> CartSubscription {
        CartSubscription {
            user_id: user_id.clone(),
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for CartChangeHub {
    fn default() -> Self {
        Self::new(256)
    }
}

/// Change notifications for one user's remote cart.
#[derive(Debug)]
pub struct CartSubscription {
    user_id: UserId,
    receiver: broadcast::Receiver<CartChange>,
}

impl CartSubscription {
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Waits until this user's cart changes. Returns `false` once the feed
    /// is closed. A lagging receiver reports a change, since the subscriber
    /// re-reads the whole cart anyway.
    pub async fn changed(&mut self) -> bool {
        loop {
            match self.receiver.recv().await {
                Ok(change) if change.user_id == self.user_id => return true,
                Ok(_) => continue,
                Err(RecvError::Lagged(_)) => return true,
                Err(RecvError::Closed) => return false,
            }
        }
    }
}
