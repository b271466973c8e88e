use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::recommendation::errors::RecommendationError;

use crate::api::error::{ErrorResponse, IntoErrorResponse, error_response};

impl IntoErrorResponse for RecommendationError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let status = match self {
            RecommendationError::InvalidLimit => StatusCode::BAD_REQUEST,
            RecommendationError::GenerationFailed | RecommendationError::InvalidReply => {
                StatusCode::BAD_GATEWAY
            }
        };
        let name = if status == StatusCode::BAD_REQUEST {
            "ValidationError"
        } else {
            "RecommendationError"
        };
        error_response(status, name, &self.to_string())
    }
}
