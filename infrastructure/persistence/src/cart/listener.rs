use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgListener;
use tokio::task::JoinHandle;

use business::domain::cart::subscription::CartChangeHub;
use business::domain::shared::value_objects::UserId;

use super::repository::CART_CHANNEL;

const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Relays `cart_changes` notifications into the hub until the task is
/// aborted. Lost connections are re-established after a short pause.
pub fn spawn_cart_listener(pool: PgPool, hub: CartChangeHub) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match listen(&pool, &hub).await {
                Ok(()) => tracing::warn!("Cart change listener stopped, restarting"),
                Err(e) => tracing::error!("Cart change listener failed: {}", e),
            }
            tokio::time::sleep(RETRY_DELAY).await;
        }
    })
}

async fn listen(pool: &PgPool, hub: &CartChangeHub) -> Result<(), sqlx::Error> {
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(CART_CHANNEL).await?;
    tracing::info!("Listening for cart changes on {}", CART_CHANNEL);

    while let Some(notification) = listener.try_recv().await? {
        let user_id = UserId::new(notification.payload());
        let receivers = hub.publish(&user_id);
        tracing::debug!("Cart of {} changed, {} watchers", user_id, receivers);
    }
    Ok(())
}
