use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::{BrowserProfile, UserId};

use super::model::LineItem;
use super::reconciliation::{MergeClaim, MergeToken};
use super::subscription::CartSubscription;
use super::value_objects::{ProductId, Quantity};

/// Browser-scoped cart persistence. Every write replaces the whole cart.
#[async_trait]
pub trait LocalCartStore: Send + Sync {
    async fn load(&self, profile: &BrowserProfile) -> Result<Vec<LineItem>, RepositoryError>;
    async fn save(
        &self,
        profile: &BrowserProfile,
        items: &[LineItem],
    ) -> Result<(), RepositoryError>;
    async fn remove(&self, profile: &BrowserProfile) -> Result<(), RepositoryError>;
}

/// Per-user cart persistence, one record per line item.
#[async_trait]
pub trait RemoteCartStore: Send + Sync {
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<LineItem>, RepositoryError>;
    /// Upsert; only the item's own fields change.
    async fn save(&self, user_id: &UserId, item: &LineItem) -> Result<(), RepositoryError>;
    /// Changes only the quantity of an existing record; no-op when absent.
    async fn update_quantity(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<(), RepositoryError>;
    async fn delete(&self, user_id: &UserId, product_id: &ProductId)
    -> Result<(), RepositoryError>;
    /// Upserts every item in one all-or-nothing batch.
    async fn save_batch(&self, user_id: &UserId, items: &[LineItem])
    -> Result<(), RepositoryError>;
    /// Deletes every record of the user in one all-or-nothing batch.
    async fn delete_all(&self, user_id: &UserId) -> Result<u64, RepositoryError>;
    fn subscribe(&self, user_id: &UserId) -> CartSubscription;
}

/// Record of login merges shared by every running instance, so a login
/// merges its local cart at most once and never twice at the same time.
#[async_trait]
pub trait MergeLedger: Send + Sync {
    async fn claim(
        &self,
        token: &MergeToken,
        user_id: &UserId,
    ) -> Result<MergeClaim, RepositoryError>;
    async fn mark_applied(&self, token: &MergeToken) -> Result<(), RepositoryError>;
    /// Drops an in-flight claim so a later trigger can retry.
    async fn release(&self, token: &MergeToken) -> Result<(), RepositoryError>;
}
