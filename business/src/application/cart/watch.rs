use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::authority::CartAuthority;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::repository::RemoteCartStore;
use crate::domain::cart::use_cases::watch::{CartWatch, WatchCartParams, WatchCartUseCase};
use crate::domain::logger::Logger;

pub struct WatchCartUseCaseImpl {
    pub remote: Arc<dyn RemoteCartStore>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl WatchCartUseCase for WatchCartUseCaseImpl {
    async fn execute(&self, params: WatchCartParams) -> Result<CartWatch, CartError> {
        match params.context.authority() {
            CartAuthority::Remote(user_id) => {
                self.logger
                    .info(&format!("Opening cart subscription for {}", user_id));
                let subscription = self.remote.subscribe(&user_id);
                Ok(CartWatch::new(self.remote.clone(), subscription))
            }
            CartAuthority::Local(profile) => {
                self.logger.debug(&format!(
                    "Refusing subscription for local cart of {}",
                    profile
                ));
                Err(CartError::NotWatchable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::value_objects::UserId;
    use crate::test_support::{
        InMemoryRemoteCartStore, anonymous_context, line_item, mock_logger, verified_context,
    };
    use std::time::Duration;

    #[tokio::test]
    async fn should_refuse_local_carts() {
        let use_case = WatchCartUseCaseImpl {
            remote: Arc::new(InMemoryRemoteCartStore::default()),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(WatchCartParams {
                context: anonymous_context(),
            })
            .await;

        assert!(matches!(result, Err(CartError::NotWatchable)));
    }

    #[tokio::test]
    async fn should_yield_snapshot_then_changes_from_other_sessions() {
        let remote = Arc::new(InMemoryRemoteCartStore::default());
        remote.seed("uid-1", vec![line_item("a", 10.0, 1)]);
        let use_case = WatchCartUseCaseImpl {
            remote: remote.clone(),
            logger: mock_logger(),
        };

        let mut watch = use_case
            .execute(WatchCartParams {
                context: verified_context("uid-1", 1),
            })
            .await
            .unwrap();

        let first = watch.next().await.unwrap().unwrap();
        assert_eq!(first.item_count, 1);

        remote
            .save(&UserId::new("uid-1"), &line_item("b", 5.0, 2))
            .await
            .unwrap();

        let second = tokio::time::timeout(Duration::from_secs(1), watch.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert_eq!(second.item_count, 3);
        assert_eq!(second.items.len(), 2);
    }

    #[tokio::test]
    async fn should_ignore_changes_of_other_users() {
        let remote = Arc::new(InMemoryRemoteCartStore::default());
        let use_case = WatchCartUseCaseImpl {
            remote: remote.clone(),
            logger: mock_logger(),
        };
        let mut watch = use_case
            .execute(WatchCartParams {
                context: verified_context("uid-1", 1),
            })
            .await
            .unwrap();
        watch.next().await.unwrap().unwrap();

        remote
            .save(&UserId::new("uid-2"), &line_item("b", 5.0, 2))
            .await
            .unwrap();

        let waited = tokio::time::timeout(Duration::from_millis(50), watch.next()).await;
        assert!(waited.is_err());
    }
}
