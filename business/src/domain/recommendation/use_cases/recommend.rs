use async_trait::async_trait;

use crate::domain::cart::value_objects::ProductId;
use crate::domain::recommendation::errors::RecommendationError;
use crate::domain::recommendation::model::BrowsedProduct;

pub struct RecommendProductsParams {
    pub history: Vec<BrowsedProduct>,
    pub preferences: Option<String>,
    /// Defaults to three.
    pub limit: Option<usize>,
}

#[async_trait]
pub trait RecommendProductsUseCase: Send + Sync {
    async fn execute(
        &self,
        params: RecommendProductsParams,
    ) -> Result<Vec<ProductId>, RecommendationError>;
}
