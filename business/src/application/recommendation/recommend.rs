use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::value_objects::ProductId;
use crate::domain::logger::Logger;
use crate::domain::recommendation::errors::RecommendationError;
use crate::domain::recommendation::model::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::domain::recommendation::services::ProductRecommenderService;
use crate::domain::recommendation::use_cases::recommend::{
    RecommendProductsParams, RecommendProductsUseCase,
};

pub struct RecommendProductsUseCaseImpl {
    pub recommender: Arc<dyn ProductRecommenderService>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RecommendProductsUseCase for RecommendProductsUseCaseImpl {
    async fn execute(
        &self,
        params: RecommendProductsParams,
    ) -> Result<Vec<ProductId>, RecommendationError> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
        if limit == 0 || limit > MAX_LIMIT {
            return Err(RecommendationError::InvalidLimit);
        }
        if params.history.is_empty() {
            return Ok(vec![]);
        }

        self.logger.info(&format!(
            "Requesting {} recommendations from {} browsed products",
            limit,
            params.history.len()
        ));

        // Ask for a few extra since already-seen ids get filtered out.
        let ranked = self
            .recommender
            .recommend(
                &params.history,
                params.preferences,
                limit + params.history.len(),
            )
            .await
            .map_err(|e| {
                self.logger
                    .error(&format!("Recommender call failed: {}", e));
                e
            })?;

        let mut seen: HashSet<ProductId> = params.history.iter().map(|p| p.id.clone()).collect();
        let recommended: Vec<ProductId> = ranked
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .take(limit)
            .collect();

        self.logger
            .debug(&format!("Returning {} recommendations", recommended.len()));
        Ok(recommended)
    }
}
