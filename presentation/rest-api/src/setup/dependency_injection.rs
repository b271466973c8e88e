use std::sync::Arc;

use tokio::task::JoinHandle;

use local_storage::FileCartStore;
use logger::TracingLogger;
use persistence::cart::listener::spawn_cart_listener;
use persistence::cart::merge_ledger::MergeLedgerPostgres;
use persistence::cart::repository::CartRepositoryPostgres;
use persistence::order::repository::OrderRepositoryPostgres;

use openai::client::OpenAIClient;
use openai::product_recommender::ProductRecommenderOpenAI;

use business::application::cart::add_item::AddCartItemUseCaseImpl;
use business::application::cart::clear::ClearCartUseCaseImpl;
use business::application::cart::get::GetCartUseCaseImpl;
use business::application::cart::merge::MergeLocalCartUseCaseImpl;
use business::application::cart::remove_item::RemoveCartItemUseCaseImpl;
use business::application::cart::set_quantity::SetCartItemQuantityUseCaseImpl;
use business::application::cart::stores::CartStores;
use business::application::cart::watch::WatchCartUseCaseImpl;
use business::application::order::get_all::GetOrdersUseCaseImpl;
use business::application::order::get_by_id::GetOrderByIdUseCaseImpl;
use business::application::order::place::PlaceOrderUseCaseImpl;
use business::application::recommendation::recommend::RecommendProductsUseCaseImpl;
use business::domain::cart::subscription::CartChangeHub;

use crate::api::security::FirebaseTokenVerifier;
use crate::config::app_config::AppConfig;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub cart_api: crate::api::cart::routes::CartApi,
    pub order_api: crate::api::order::routes::OrderApi,
    pub recommendation_api: crate::api::recommendation::routes::RecommendationApi,
    pub verifier: Arc<FirebaseTokenVerifier>,
    /// Relays database cart notifications; aborted when the server stops.
    pub cart_listener: JoinHandle<()>,
}

impl DependencyContainer {
    pub async fn new(config: &AppConfig, pool: sqlx::PgPool) -> anyhow::Result<Self> {
        let logger = Arc::new(TracingLogger);
        let health_api = crate::api::health::routes::Api::new(pool.clone());
        let verifier = Arc::new(FirebaseTokenVerifier::new(config.firebase.project_id.clone()));

        // Infrastructure adapters
        let hub = CartChangeHub::default();
        let cart_listener = spawn_cart_listener(pool.clone(), hub.clone());

        let local_store = FileCartStore::new(config.local_storage.root.clone());
        local_store.ensure_root().await?;
        let local_store = Arc::new(local_store);
        let remote_store = Arc::new(CartRepositoryPostgres::new(pool.clone(), hub));
        let merge_ledger = Arc::new(MergeLedgerPostgres::new(pool.clone()));
        let order_repository = Arc::new(OrderRepositoryPostgres::new(pool));

        let openai_client =
            OpenAIClient::new(config.openai.api_key.clone(), config.openai.model.clone());
        let recommender = Arc::new(ProductRecommenderOpenAI::new(openai_client));

        let stores = CartStores::new(local_store, remote_store.clone());

        // Cart use cases
        let get_cart_use_case = Arc::new(GetCartUseCaseImpl {
            stores: stores.clone(),
            logger: logger.clone(),
        });
        let add_item_use_case = Arc::new(AddCartItemUseCaseImpl {
            stores: stores.clone(),
            logger: logger.clone(),
        });
        let set_quantity_use_case = Arc::new(SetCartItemQuantityUseCaseImpl {
            stores: stores.clone(),
            logger: logger.clone(),
        });
        let remove_item_use_case = Arc::new(RemoveCartItemUseCaseImpl {
            stores: stores.clone(),
            logger: logger.clone(),
        });
        let clear_cart_use_case = Arc::new(ClearCartUseCaseImpl {
            stores: stores.clone(),
            logger: logger.clone(),
        });
        let merge_use_case = Arc::new(MergeLocalCartUseCaseImpl {
            stores,
            ledger: merge_ledger,
            logger: logger.clone(),
        });
        let watch_use_case = Arc::new(WatchCartUseCaseImpl {
            remote: remote_store.clone(),
            logger: logger.clone(),
        });

        // Order use cases
        let place_order_use_case = Arc::new(PlaceOrderUseCaseImpl {
            orders: order_repository.clone(),
            cart: remote_store,
            logger: logger.clone(),
        });
        let get_orders_use_case = Arc::new(GetOrdersUseCaseImpl {
            repository: order_repository.clone(),
            logger: logger.clone(),
        });
        let get_order_by_id_use_case = Arc::new(GetOrderByIdUseCaseImpl {
            repository: order_repository,
            logger: logger.clone(),
        });

        // Recommendation use cases
        let recommend_use_case = Arc::new(RecommendProductsUseCaseImpl {
            recommender,
            logger,
        });

        let cart_api = crate::api::cart::routes::CartApi::new(
            verifier.clone(),
            get_cart_use_case,
            add_item_use_case,
            set_quantity_use_case,
            remove_item_use_case,
            clear_cart_use_case,
            merge_use_case,
            watch_use_case,
        );

        let order_api = crate::api::order::routes::OrderApi::new(
            place_order_use_case,
            get_orders_use_case,
            get_order_by_id_use_case,
        );

        let recommendation_api =
            crate::api::recommendation::routes::RecommendationApi::new(recommend_use_case);

        Ok(Self {
            health_api,
            cart_api,
            order_api,
            recommendation_api,
            verifier,
            cart_listener,
        })
    }
}
