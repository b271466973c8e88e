use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::cart::errors::CartError;

use crate::api::error::{ErrorResponse, IntoErrorResponse, error_response};

impl IntoErrorResponse for CartError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        match &self {
            CartError::ProductIdEmpty
            | CartError::ProductNameEmpty
            | CartError::InvalidPrice
            | CartError::InvalidQuantity => {
                error_response(StatusCode::BAD_REQUEST, "ValidationError", &self.to_string())
            }
            CartError::NotWatchable => {
                error_response(StatusCode::FORBIDDEN, "AuthError", "cart.not_watchable")
            }
            CartError::Repository(err) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "PersistenceError",
                &err.to_string(),
            ),
        }
    }
}
