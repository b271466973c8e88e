use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

use business::domain::auth::errors::AuthError;

use crate::api::security::ShopperError;

#[derive(Object, Debug)]
pub struct ErrorResponse {
    pub name: String,
    pub message: String,
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}

pub(crate) fn error_response(
    status: StatusCode,
    name: &str,
    message: &str,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            name: name.to_string(),
            message: message.to_string(),
        }),
    )
}

impl IntoErrorResponse for AuthError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let status = match self {
            AuthError::MissingToken | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::AnonymousNotAllowed => StatusCode::FORBIDDEN,
            AuthError::CertsUnavailable => StatusCode::BAD_GATEWAY,
        };
        error_response(status, "AuthError", &self.to_string())
    }
}

impl IntoErrorResponse for ShopperError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        match self {
            ShopperError::InvalidProfile => {
                error_response(StatusCode::BAD_REQUEST, "ValidationError", &self.to_string())
            }
            ShopperError::Auth(err) => err.into_error_response(),
        }
    }
}
