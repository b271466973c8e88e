use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};
use uuid::Uuid;

use business::domain::order::use_cases::get_all::{GetOrdersParams, GetOrdersUseCase};
use business::domain::order::use_cases::get_by_id::{GetOrderByIdParams, GetOrderByIdUseCase};
use business::domain::order::use_cases::place::{PlaceOrderParams, PlaceOrderUseCase};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::order::dto::{OrderResponse, PlaceOrderRequest};
use crate::api::security::FirebaseBearer;
use crate::api::tags::ApiTags;

pub struct OrderApi {
    place_use_case: Arc<dyn PlaceOrderUseCase>,
    get_all_use_case: Arc<dyn GetOrdersUseCase>,
    get_by_id_use_case: Arc<dyn GetOrderByIdUseCase>,
}

impl OrderApi {
    pub fn new(
        place_use_case: Arc<dyn PlaceOrderUseCase>,
        get_all_use_case: Arc<dyn GetOrdersUseCase>,
        get_by_id_use_case: Arc<dyn GetOrderByIdUseCase>,
    ) -> Self {
        Self {
            place_use_case,
            get_all_use_case,
            get_by_id_use_case,
        }
    }
}

/// Checkout and order history
///
/// All endpoints need a Firebase token of a signed-in (non-anonymous)
/// account.
#[OpenApi]
impl OrderApi {
    /// Place an order
    ///
    /// Turns the account cart into an order with the prices it holds now,
    /// then empties the cart. Password accounts must have a verified email.
    #[oai(path = "/orders", method = "post", tag = "ApiTags::Orders")]
    async fn place(&self, auth: FirebaseBearer, body: Json<PlaceOrderRequest>) -> PlaceOrderResponse {
        let params = PlaceOrderParams {
            identity: auth.0,
            customer_details: body.0.into(),
        };

        match self.place_use_case.execute(params).await {
            Ok(order) => PlaceOrderResponse::Created(Json(order.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => PlaceOrderResponse::BadRequest(json),
                    401 => PlaceOrderResponse::Unauthorized(json),
                    403 => PlaceOrderResponse::Forbidden(json),
                    _ => PlaceOrderResponse::InternalError(json),
                }
            }
        }
    }

    /// List orders
    ///
    /// Orders of the signed-in account, newest first.
    #[oai(path = "/orders", method = "get", tag = "ApiTags::Orders")]
    async fn get_all(&self, auth: FirebaseBearer) -> GetOrdersResponse {
        match self
            .get_all_use_case
            .execute(GetOrdersParams { identity: auth.0 })
            .await
        {
            Ok(orders) => {
                let responses: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();
                GetOrdersResponse::Ok(Json(responses))
            }
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    401 => GetOrdersResponse::Unauthorized(json),
                    _ => GetOrdersResponse::InternalError(json),
                }
            }
        }
    }

    /// Get an order
    #[oai(path = "/orders/:id", method = "get", tag = "ApiTags::Orders")]
    async fn get_by_id(&self, auth: FirebaseBearer, id: Path<String>) -> GetOrderResponse {
        let Ok(id) = Uuid::parse_str(&id.0) else {
            return GetOrderResponse::BadRequest(Json(ErrorResponse {
                name: "ValidationError".to_string(),
                message: "order.invalid_id".to_string(),
            }));
        };

        match self
            .get_by_id_use_case
            .execute(GetOrderByIdParams {
                identity: auth.0,
                id,
            })
            .await
        {
            Ok(order) => GetOrderResponse::Ok(Json(order.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    401 => GetOrderResponse::Unauthorized(json),
                    404 => GetOrderResponse::NotFound(json),
                    _ => GetOrderResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum PlaceOrderResponse {
    #[oai(status = 201)]
    Created(Json<OrderResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    /// Email address not verified yet.
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetOrdersResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<OrderResponse>>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetOrderResponse {
    #[oai(status = 200)]
    Ok(Json<OrderResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
