use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::stores::CartStores;
use crate::domain::auth::identity::AuthIdentity;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::LineItem;
use crate::domain::cart::reconciliation::{
    MergeClaim, MergeOutcome, MergeToken, merge_local_into_remote,
};
use crate::domain::cart::repository::MergeLedger;
use crate::domain::cart::use_cases::merge::{MergeLocalCartParams, MergeLocalCartUseCase};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::UserId;

/// Folds the browser-local cart into the remote one on sign-in.
///
/// The batch write is all-or-nothing and runs under a ledger claim, so one
/// login merges at most once across instances. The local cart is only
/// removed after the batch commits.
pub struct MergeLocalCartUseCaseImpl {
    pub stores: CartStores,
    pub ledger: Arc<dyn MergeLedger>,
    pub logger: Arc<dyn Logger>,
}

impl MergeLocalCartUseCaseImpl {
    async fn write_merged(
        &self,
        user_id: &UserId,
        local: &[LineItem],
    ) -> Result<usize, RepositoryError> {
        let remote = self.stores.remote.get_all(user_id).await?;
        let merged = merge_local_into_remote(local, &remote);
        self.stores.remote.save_batch(user_id, &merged).await?;
        Ok(merged.len())
    }
}

#[async_trait]
impl MergeLocalCartUseCase for MergeLocalCartUseCaseImpl {
    async fn execute(&self, params: MergeLocalCartParams) -> Result<MergeOutcome, CartError> {
        let Some(account) = params
            .context
            .identity
            .as_ref()
            .and_then(AuthIdentity::verified)
        else {
            return Ok(MergeOutcome::NotEligible);
        };
        let profile = &params.context.profile;

        let local = self.stores.local.load(profile).await?;
        if local.is_empty() {
            return Ok(MergeOutcome::NothingToMerge);
        }

        let token = MergeToken::for_login(account);
        match self.ledger.claim(&token, &account.user_id).await? {
            MergeClaim::Granted => {}
            MergeClaim::InProgress => {
                self.logger.debug(&format!(
                    "Merge for {} already running",
                    account.user_id
                ));
                return Ok(MergeOutcome::InProgress);
            }
            MergeClaim::AlreadyApplied => {
                self.logger.warn(&format!(
                    "Local cart of {} still present after merge for {}",
                    profile, account.user_id
                ));
                return Ok(MergeOutcome::AlreadyApplied);
            }
        }

        let items = match self.write_merged(&account.user_id, &local).await {
            Ok(items) => items,
            Err(e) => {
                self.logger.error(&format!(
                    "Merge batch for {} failed: {}",
                    account.user_id, e
                ));
                if let Err(release) = self.ledger.release(&token).await {
                    self.logger.warn(&format!(
                        "Could not release merge claim of {}: {}",
                        account.user_id, release
                    ));
                }
                return Err(e.into());
            }
        };

        // The batch is committed; a claim left in flight only expires.
        if let Err(e) = self.ledger.mark_applied(&token).await {
            self.logger.error(&format!(
                "Merge for {} committed but not recorded: {}",
                account.user_id, e
            ));
        }

        self.logger.info(&format!(
            "Merged {} local items of {} into cart of {}",
            items, profile, account.user_id
        ));

        let local_kept = match self.stores.local.remove(profile).await {
            Ok(()) => false,
            Err(e) => {
                self.logger.warn(&format!(
                    "Could not remove merged local cart of {}: {}",
                    profile, e
                ));
                true
            }
        };

        Ok(MergeOutcome::Merged { items, local_kept })
    }
}
