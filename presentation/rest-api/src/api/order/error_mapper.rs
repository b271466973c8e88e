use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::order::errors::OrderError;

use crate::api::error::{ErrorResponse, IntoErrorResponse, error_response};

impl IntoErrorResponse for OrderError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let message = self.to_string();
        let (status, name) = match &self {
            OrderError::NotAuthenticated => (StatusCode::UNAUTHORIZED, "AuthError"),
            OrderError::EmailNotVerified => (StatusCode::FORBIDDEN, "AuthError"),
            OrderError::EmptyCart
            | OrderError::CustomerNameTooShort
            | OrderError::AddressTooShort => (StatusCode::BAD_REQUEST, "ValidationError"),
            OrderError::NotFound => (StatusCode::NOT_FOUND, "NotFound"),
            OrderError::CartNotCleared { order_id } => {
                tracing::error!("Order {} placed but cart was not cleared", order_id);
                (StatusCode::INTERNAL_SERVER_ERROR, "PersistenceError")
            }
            OrderError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PersistenceError"),
        };
        error_response(status, name, &message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_unverified_email_to_forbidden() {
        let (status, json) = OrderError::EmailNotVerified.into_error_response();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json.0.message, "order.email_not_verified");
    }

    #[test]
    fn should_map_empty_cart_to_validation_error() {
        let (status, json) = OrderError::EmptyCart.into_error_response();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json.0.name, "ValidationError");
    }

    #[test]
    fn should_report_uncleared_cart_as_persistence_error() {
        let (status, json) = OrderError::CartNotCleared {
            order_id: uuid::Uuid::new_v4(),
        }
        .into_error_response();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json.0.name, "PersistenceError");
        assert_eq!(json.0.message, "order.cart_not_cleared");
    }
}
