use std::sync::Arc;

use futures::StreamExt;
use futures::stream::{self, BoxStream};
use poem::http::StatusCode;
use poem_openapi::param::{Header, Path};
use poem_openapi::payload::{EventStream, Json};
use poem_openapi::{ApiResponse, OpenApi};

use business::domain::cart::authority::CartContext;
use business::domain::cart::errors::CartError;
use business::domain::cart::use_cases::add_item::{AddCartItemParams, AddCartItemUseCase};
use business::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use business::domain::cart::use_cases::get::{GetCartParams, GetCartUseCase};
use business::domain::cart::use_cases::merge::{MergeLocalCartParams, MergeLocalCartUseCase};
use business::domain::cart::use_cases::remove_item::{
    RemoveCartItemParams, RemoveCartItemUseCase,
};
use business::domain::cart::use_cases::set_quantity::{
    SetCartItemQuantityParams, SetCartItemQuantityUseCase,
};
use business::domain::cart::use_cases::watch::{CartWatch, WatchCartParams, WatchCartUseCase};
use business::domain::cart::mutation::CartMutation;
use business::domain::cart::value_objects::{ProductId, ProductSnapshot};

use crate::api::cart::dto::{
    AddCartItemRequest, CartMutationResponse, CartSummaryResponse, MergeResponse,
    SetQuantityRequest,
};
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::security::{FirebaseTokenVerifier, resolve_shopper};
use crate::api::tags::ApiTags;

type Failure = (StatusCode, Json<ErrorResponse>);

pub struct CartApi {
    verifier: Arc<FirebaseTokenVerifier>,
    get_use_case: Arc<dyn GetCartUseCase>,
    add_item_use_case: Arc<dyn AddCartItemUseCase>,
    set_quantity_use_case: Arc<dyn SetCartItemQuantityUseCase>,
    remove_item_use_case: Arc<dyn RemoveCartItemUseCase>,
    clear_use_case: Arc<dyn ClearCartUseCase>,
    merge_use_case: Arc<dyn MergeLocalCartUseCase>,
    watch_use_case: Arc<dyn WatchCartUseCase>,
}

impl CartApi {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        verifier: Arc<FirebaseTokenVerifier>,
        get_use_case: Arc<dyn GetCartUseCase>,
        add_item_use_case: Arc<dyn AddCartItemUseCase>,
        set_quantity_use_case: Arc<dyn SetCartItemQuantityUseCase>,
        remove_item_use_case: Arc<dyn RemoveCartItemUseCase>,
        clear_use_case: Arc<dyn ClearCartUseCase>,
        merge_use_case: Arc<dyn MergeLocalCartUseCase>,
        watch_use_case: Arc<dyn WatchCartUseCase>,
    ) -> Self {
        Self {
            verifier,
            get_use_case,
            add_item_use_case,
            set_quantity_use_case,
            remove_item_use_case,
            clear_use_case,
            merge_use_case,
            watch_use_case,
        }
    }

    async fn shopper(
        &self,
        profile: Header<String>,
        authorization: Header<Option<String>>,
    ) -> Result<CartContext, Failure> {
        resolve_shopper(&self.verifier, &profile.0, authorization.0.as_deref())
            .await
            .map_err(IntoErrorResponse::into_error_response)
    }
}

/// Shopping cart of the current shopper
///
/// Every endpoint needs the `X-Browser-Profile` header. Without a bearer
/// token, or with an anonymous one, the browser-local cart is used; a
/// verified account uses its account cart.
#[OpenApi]
impl CartApi {
    /// Get the cart
    #[oai(path = "/cart", method = "get", tag = "ApiTags::Cart")]
    async fn get(
        &self,
        #[oai(name = "X-Browser-Profile")] profile: Header<String>,
        #[oai(name = "Authorization")] authorization: Header<Option<String>>,
    ) -> GetCartResponse {
        let context = match self.shopper(profile, authorization).await {
            Ok(context) => context,
            Err(failure) => return GetCartResponse::from_failure(failure),
        };

        match self.get_use_case.execute(GetCartParams { context }).await {
            Ok(summary) => GetCartResponse::Ok(Json(summary.into())),
            Err(err) => GetCartResponse::from_failure(err.into_error_response()),
        }
    }

    /// Add a product
    ///
    /// Adds one unit. A product already in the cart keeps the details it was
    /// first added with.
    #[oai(path = "/cart/items", method = "post", tag = "ApiTags::Cart")]
    async fn add_item(
        &self,
        #[oai(name = "X-Browser-Profile")] profile: Header<String>,
        #[oai(name = "Authorization")] authorization: Header<Option<String>>,
        body: Json<AddCartItemRequest>,
    ) -> CartMutationApiResponse {
        let context = match self.shopper(profile, authorization).await {
            Ok(context) => context,
            Err(failure) => return CartMutationApiResponse::from_failure(failure),
        };
        let product = match ProductSnapshot::try_from(body.0) {
            Ok(product) => product,
            Err(err) => return CartMutationApiResponse::from_failure(err.into_error_response()),
        };

        CartMutationApiResponse::from_result(
            self.add_item_use_case
                .execute(AddCartItemParams { context, product })
                .await,
        )
    }

    /// Set the quantity of a product
    ///
    /// Zero or a negative quantity removes the product.
    #[oai(path = "/cart/items/:product_id", method = "put", tag = "ApiTags::Cart")]
    async fn set_quantity(
        &self,
        product_id: Path<String>,
        #[oai(name = "X-Browser-Profile")] profile: Header<String>,
        #[oai(name = "Authorization")] authorization: Header<Option<String>>,
        body: Json<SetQuantityRequest>,
    ) -> CartMutationApiResponse {
        let context = match self.shopper(profile, authorization).await {
            Ok(context) => context,
            Err(failure) => return CartMutationApiResponse::from_failure(failure),
        };
        let product_id = match ProductId::new(product_id.0) {
            Ok(id) => id,
            Err(err) => return CartMutationApiResponse::from_failure(err.into_error_response()),
        };

        CartMutationApiResponse::from_result(
            self.set_quantity_use_case
                .execute(SetCartItemQuantityParams {
                    context,
                    product_id,
                    quantity: body.0.quantity,
                })
                .await,
        )
    }

    /// Remove a product
    #[oai(
        path = "/cart/items/:product_id",
        method = "delete",
        tag = "ApiTags::Cart"
    )]
    async fn remove_item(
        &self,
        product_id: Path<String>,
        #[oai(name = "X-Browser-Profile")] profile: Header<String>,
        #[oai(name = "Authorization")] authorization: Header<Option<String>>,
    ) -> CartMutationApiResponse {
        let context = match self.shopper(profile, authorization).await {
            Ok(context) => context,
            Err(failure) => return CartMutationApiResponse::from_failure(failure),
        };
        let product_id = match ProductId::new(product_id.0) {
            Ok(id) => id,
            Err(err) => return CartMutationApiResponse::from_failure(err.into_error_response()),
        };

        CartMutationApiResponse::from_result(
            self.remove_item_use_case
                .execute(RemoveCartItemParams {
                    context,
                    product_id,
                })
                .await,
        )
    }

    /// Empty the cart
    #[oai(path = "/cart", method = "delete", tag = "ApiTags::Cart")]
    async fn clear(
        &self,
        #[oai(name = "X-Browser-Profile")] profile: Header<String>,
        #[oai(name = "Authorization")] authorization: Header<Option<String>>,
    ) -> CartMutationApiResponse {
        let context = match self.shopper(profile, authorization).await {
            Ok(context) => context,
            Err(failure) => return CartMutationApiResponse::from_failure(failure),
        };

        CartMutationApiResponse::from_result(
            self.clear_use_case.execute(ClearCartParams { context }).await,
        )
    }

    /// Merge the browser cart into the account cart
    ///
    /// Called after sign-in. Runs at most once per login; repeated calls
    /// report `already_applied` or `in_progress`.
    #[oai(path = "/cart/merge", method = "post", tag = "ApiTags::Cart")]
    async fn merge(
        &self,
        #[oai(name = "X-Browser-Profile")] profile: Header<String>,
        #[oai(name = "Authorization")] authorization: Header<Option<String>>,
    ) -> MergeCartResponse {
        let context = match self.shopper(profile, authorization).await {
            Ok(context) => context,
            Err(failure) => return MergeCartResponse::from_failure(failure),
        };

        match self
            .merge_use_case
            .execute(MergeLocalCartParams { context })
            .await
        {
            Ok(outcome) => MergeCartResponse::Ok(Json(outcome.into())),
            Err(err) => MergeCartResponse::from_failure(err.into_error_response()),
        }
    }

    /// Follow the account cart
    ///
    /// Server-sent events: the current cart first, then the whole cart again
    /// after every change made from any device. Only account carts can be
    /// followed.
    #[oai(path = "/cart/events", method = "get", tag = "ApiTags::Cart")]
    async fn events(
        &self,
        #[oai(name = "X-Browser-Profile")] profile: Header<String>,
        #[oai(name = "Authorization")] authorization: Header<Option<String>>,
    ) -> CartEventsResponse {
        let context = match self.shopper(profile, authorization).await {
            Ok(context) => context,
            Err(failure) => return CartEventsResponse::from_failure(failure),
        };

        match self.watch_use_case.execute(WatchCartParams { context }).await {
            Ok(watch) => CartEventsResponse::Ok(EventStream::new(summaries(watch))),
            Err(err) => CartEventsResponse::from_failure(err.into_error_response()),
        }
    }
}

/// Turns a watch into a stream of summaries. Failed re-reads are skipped;
/// the next change triggers another one.
fn summaries(watch: CartWatch) -> BoxStream<'static, CartSummaryResponse> {
    stream::unfold(watch, |mut watch| async move {
        loop {
            match watch.next().await? {
                Ok(summary) => return Some((summary.into(), watch)),
                Err(err) => tracing::warn!("Skipping cart event after failed read: {}", err),
            }
        }
    })
    .boxed()
}

#[derive(ApiResponse)]
pub enum GetCartResponse {
    #[oai(status = 200)]
    Ok(Json<CartSummaryResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
}

impl GetCartResponse {
    fn from_failure((status, json): Failure) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(json),
            401 | 403 => Self::Unauthorized(json),
            502 => Self::BadGateway(json),
            _ => Self::InternalError(json),
        }
    }
}

#[derive(ApiResponse)]
pub enum CartMutationApiResponse {
    #[oai(status = 200)]
    Ok(Json<CartMutationResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
    /// The change was not saved; the body carries the unchanged cart and a
    /// notice for the shopper.
    #[oai(status = 503)]
    NotSaved(Json<CartMutationResponse>),
}

impl CartMutationApiResponse {
    fn from_result(result: Result<CartMutation, CartError>) -> Self {
        match result {
            Ok(mutation) if mutation.is_committed() => Self::Ok(Json(mutation.into())),
            Ok(mutation) => Self::NotSaved(Json(mutation.into())),
            Err(err) => Self::from_failure(err.into_error_response()),
        }
    }

    fn from_failure((status, json): Failure) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(json),
            401 | 403 => Self::Unauthorized(json),
            502 => Self::BadGateway(json),
            _ => Self::InternalError(json),
        }
    }
}

#[derive(ApiResponse)]
pub enum MergeCartResponse {
    #[oai(status = 200)]
    Ok(Json<MergeResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
}

impl MergeCartResponse {
    fn from_failure((status, json): Failure) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(json),
            401 | 403 => Self::Unauthorized(json),
            502 => Self::BadGateway(json),
            _ => Self::InternalError(json),
        }
    }
}

#[derive(ApiResponse)]
pub enum CartEventsResponse {
    #[oai(status = 200)]
    Ok(EventStream<BoxStream<'static, CartSummaryResponse>>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    /// The shopper has no account cart to follow.
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
}

impl CartEventsResponse {
    fn from_failure((status, json): Failure) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(json),
            401 => Self::Unauthorized(json),
            403 => Self::Forbidden(json),
            502 => Self::BadGateway(json),
            _ => Self::InternalError(json),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use business::domain::cart::model::LineItem;
    use business::domain::cart::repository::RemoteCartStore;
    use business::domain::cart::subscription::{CartChangeHub, CartSubscription};
    use business::domain::cart::value_objects::{Money, Quantity};
    use business::domain::errors::RepositoryError;
    use business::domain::shared::value_objects::UserId;
    use tokio::sync::Mutex;

    struct SingleCartStore {
        items: Mutex<Vec<LineItem>>,
        hub: CartChangeHub,
    }

    #[async_trait]
    impl RemoteCartStore for SingleCartStore {
        async fn get_all(&self, _user_id: &UserId) -> Result<Vec<LineItem>, RepositoryError> {
            Ok(self.items.lock().await.clone())
        }
        async fn save(&self, user_id: &UserId, item: &LineItem) -> Result<(), RepositoryError> {
            self.items.lock().await.push(item.clone());
            self.hub.publish(user_id);
            Ok(())
        }
        async fn update_quantity(
            &self,
            _user_id: &UserId,
            _product_id: &ProductId,
            _quantity: Quantity,
        ) -> Result<(), RepositoryError> {
            Ok(())
        }
        async fn delete(
            &self,
            _user_id: &UserId,
            _product_id: &ProductId,
        ) -> Result<(), RepositoryError> {
            Ok(())
        }
        async fn save_batch(
            &self,
            _user_id: &UserId,
            _items: &[LineItem],
        ) -> Result<(), RepositoryError> {
            Ok(())
        }
        async fn delete_all(&self, _user_id: &UserId) -> Result<u64, RepositoryError> {
            Ok(0)
        }
        fn subscribe(&self, user_id: &UserId) -> CartSubscription {
            self.hub.subscribe(user_id)
        }
    }

    fn item(id: &str) -> LineItem {
        LineItem::new(
            ProductSnapshot::new(
                ProductId::new(id).unwrap(),
                "Capulana".to_string(),
                Money::from_f64(25.0).unwrap(),
                None,
                None,
            )
            .unwrap(),
            Quantity::new(1).unwrap(),
        )
    }

    #[tokio::test]
    async fn should_stream_current_cart_then_changes() {
        let store = Arc::new(SingleCartStore {
            items: Mutex::new(vec![item("a")]),
            hub: CartChangeHub::new(8),
        });
        let user_id = UserId::new("uid-1");
        let watch = CartWatch::new(store.clone(), store.subscribe(&user_id));
        let mut events = summaries(watch);

        let first = events.next().await.unwrap();
        assert_eq!(first.item_count, 1);

        store.save(&user_id, &item("b")).await.unwrap();
        let second = tokio::time::timeout(Duration::from_secs(1), events.next())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.item_count, 2);
        assert_eq!(second.source, "remote");
    }

    #[test]
    fn should_answer_failed_mutation_with_service_unavailable() {
        use business::domain::cart::authority::{CartAuthority, CartSummary};
        use business::domain::cart::model::Cart;
        use business::domain::cart::mutation::CartMutationKind;

        let before = CartSummary::of(CartAuthority::Remote(UserId::new("uid-1")), &Cart::new());
        let failed =
            CartMutation::pending(CartMutationKind::Clear, before).fail(&RepositoryError::DatabaseError);

        assert!(matches!(
            CartMutationApiResponse::from_result(Ok(failed)),
            CartMutationApiResponse::NotSaved(_)
        ));
    }

    #[test]
    fn should_map_validation_error_to_bad_request() {
        assert!(matches!(
            CartMutationApiResponse::from_result(Err(CartError::ProductIdEmpty)),
            CartMutationApiResponse::BadRequest(_)
        ));
    }
}
