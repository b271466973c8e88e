use async_trait::async_trait;

use crate::domain::cart::value_objects::ProductId;

use super::errors::RecommendationError;
use super::model::BrowsedProduct;

/// Ranks catalog products for a shopper. Best match first.
#[async_trait]
pub trait ProductRecommenderService: Send + Sync {
    async fn recommend(
        &self,
        history: &[BrowsedProduct],
        preferences: Option<String>,
        limit: usize,
    ) -> Result<Vec<ProductId>, RecommendationError>;
}
