use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use business::domain::cart::model::LineItem;
use business::domain::cart::repository::RemoteCartStore;
use business::domain::cart::subscription::{CartChangeHub, CartSubscription};
use business::domain::cart::value_objects::{ProductId, Quantity};
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::UserId;

use super::entity::CartItemEntity;

/// Channel carrying the user id of every committed cart write.
pub const CART_CHANNEL: &str = "cart_changes";

/// Remote cart store on the `cart_items` table. Every write notifies
/// [`CART_CHANNEL`] in its own transaction, so subscribers on any instance
/// hear about it once it commits.
pub struct CartRepositoryPostgres {
    pool: PgPool,
    hub: CartChangeHub,
}

impl CartRepositoryPostgres {
    pub fn new(pool: PgPool, hub: CartChangeHub) -> Self {
        Self { pool, hub }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, RepositoryError> {
        self.pool.begin().await.map_err(|e| {
            tracing::error!("Could not open cart transaction: {}", e);
            RepositoryError::DatabaseError
        })
    }
}

/// Queues the change notification and commits.
async fn finish(
    mut tx: Transaction<'static, Postgres>,
    user_id: &UserId,
    failure: RepositoryError,
) -> Result<(), RepositoryError> {
    sqlx::query("SELECT pg_notify($1, $2)")
        .bind(CART_CHANNEL)
        .bind(user_id.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Cart notification for {} failed: {}", user_id, e);
            failure.clone()
        })?;

    tx.commit().await.map_err(|e| {
        tracing::error!("Cart commit for {} failed: {}", user_id, e);
        failure
    })
}

fn write_failed(user_id: &UserId, failure: RepositoryError) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    let user_id = user_id.clone();
    move |e| {
        tracing::error!("Cart write for {} failed: {}", user_id, e);
        failure
    }
}

async fn upsert(
    conn: &mut PgConnection,
    user_id: &UserId,
    item: &LineItem,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO cart_items (user_id, product_id, name, price, quantity, image, category, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, now())
        ON CONFLICT (user_id, product_id) DO UPDATE SET
            name = EXCLUDED.name,
            price = EXCLUDED.price,
            quantity = EXCLUDED.quantity,
            image = EXCLUDED.image,
            category = EXCLUDED.category,
            updated_at = EXCLUDED.updated_at"#,
    )
    .bind(user_id.as_str())
    .bind(item.id().as_str())
    .bind(&item.product.name)
    .bind(item.product.price.amount())
    .bind(i32::from(item.quantity))
    .bind(item.product.image.as_deref())
    .bind(item.product.category.as_deref())
    .execute(conn)
    .await?;
    Ok(())
}

#[async_trait]
impl RemoteCartStore for CartRepositoryPostgres {
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<LineItem>, RepositoryError> {
        let entities = sqlx::query_as::<_, CartItemEntity>(
            "SELECT user_id, product_id, name, price, quantity, image, category, updated_at FROM cart_items WHERE user_id = $1 ORDER BY created_at, product_id",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to read cart of {}: {}", user_id, e);
            RepositoryError::DatabaseError
        })?;

        // A bad row is skipped so the rest of the cart stays usable.
        Ok(entities
            .into_iter()
            .filter_map(|entity| {
                let product_id = entity.product_id.clone();
                entity
                    .into_domain()
                    .map_err(|e| {
                        tracing::warn!("Skipping cart row {}/{}: {}", user_id, product_id, e)
                    })
                    .ok()
            })
            .collect())
    }

    async fn save(&self, user_id: &UserId, item: &LineItem) -> Result<(), RepositoryError> {
        let mut tx = self.begin().await?;
        upsert(&mut tx, user_id, item)
            .await
            .map_err(write_failed(user_id, RepositoryError::DatabaseError))?;
        finish(tx, user_id, RepositoryError::DatabaseError).await
    }

    async fn update_quantity(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.begin().await?;
        let result = sqlx::query(
            "UPDATE cart_items SET quantity = $3, updated_at = now() WHERE user_id = $1 AND product_id = $2",
        )
        .bind(user_id.as_str())
        .bind(product_id.as_str())
        .bind(i32::from(quantity))
        .execute(&mut *tx)
        .await
        .map_err(write_failed(user_id, RepositoryError::DatabaseError))?;

        if result.rows_affected() == 0 {
            return Ok(());
        }
        finish(tx, user_id, RepositoryError::DatabaseError).await
    }

    async fn delete(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.begin().await?;
        sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
            .bind(user_id.as_str())
            .bind(product_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(write_failed(user_id, RepositoryError::DatabaseError))?;
        finish(tx, user_id, RepositoryError::DatabaseError).await
    }

    async fn save_batch(
        &self,
        user_id: &UserId,
        items: &[LineItem],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.begin().await?;
        for item in items {
            upsert(&mut tx, user_id, item)
                .await
                .map_err(write_failed(user_id, RepositoryError::BatchFailed))?;
        }
        finish(tx, user_id, RepositoryError::BatchFailed).await?;

        tracing::debug!("Committed batch of {} cart items for {}", items.len(), user_id);
        Ok(())
    }

    async fn delete_all(&self, user_id: &UserId) -> Result<u64, RepositoryError> {
        let mut tx = self.begin().await?;
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(write_failed(user_id, RepositoryError::BatchFailed))?;
        finish(tx, user_id, RepositoryError::BatchFailed).await?;
        Ok(result.rows_affected())
    }

    fn subscribe(&self, user_id: &UserId) -> CartSubscription {
        self.hub.subscribe(user_id)
    }
}
