use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use business::domain::recommendation::model::BrowsedProduct;
use business::domain::recommendation::use_cases::recommend::{
    RecommendProductsParams, RecommendProductsUseCase,
};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::recommendation::dto::{RecommendRequest, RecommendResponse};
use crate::api::tags::ApiTags;

pub struct RecommendationApi {
    recommend_use_case: Arc<dyn RecommendProductsUseCase>,
}

impl RecommendationApi {
    pub fn new(recommend_use_case: Arc<dyn RecommendProductsUseCase>) -> Self {
        Self { recommend_use_case }
    }
}

#[OpenApi]
impl RecommendationApi {
    /// Recommend products
    ///
    /// Suggests products related to the browsing history. Products from the
    /// history are never suggested back. An empty history gives an empty
    /// list.
    #[oai(
        path = "/recommendations",
        method = "post",
        tag = "ApiTags::Recommendations"
    )]
    async fn recommend(&self, body: Json<RecommendRequest>) -> RecommendProductsResponse {
        let request = body.0;
        let history = match request
            .history
            .into_iter()
            .map(BrowsedProduct::try_from)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(history) => history,
            Err(err) => {
                let (_status, json) = err.into_error_response();
                return RecommendProductsResponse::BadRequest(json);
            }
        };

        let params = RecommendProductsParams {
            history,
            preferences: request.preferences,
            limit: request.limit.map(|l| l as usize),
        };

        match self.recommend_use_case.execute(params).await {
            Ok(ids) => RecommendProductsResponse::Ok(Json(RecommendResponse {
                product_ids: ids.into_iter().map(|id| id.to_string()).collect(),
            })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => RecommendProductsResponse::BadRequest(json),
                    _ => RecommendProductsResponse::BadGateway(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum RecommendProductsResponse {
    #[oai(status = 200)]
    Ok(Json<RecommendResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    /// The recommendation service failed or answered with something unusable.
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
}
