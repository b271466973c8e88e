//! Merging a browser-local cart into the remote cart after sign-in.

use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

use crate::domain::auth::identity::VerifiedAccount;

use super::model::LineItem;

/// Items to write so that the remote cart also holds the local one.
///
/// A product present on both sides ends with the sum of both quantities and
/// the local snapshot; local-only products keep their local quantity.
/// Remote-only products are untouched and therefore not returned.
pub fn merge_local_into_remote(local: &[LineItem], remote: &[LineItem]) -> Vec<LineItem> {
    let remote_quantities: HashMap<_, _> = remote
        .iter()
        .map(|item| (item.id(), item.quantity))
        .collect();

    local
        .iter()
        .map(|local_item| {
            let quantity = match remote_quantities.get(local_item.id()) {
                Some(remote_quantity) => remote_quantity.saturating_add(local_item.quantity),
                None => local_item.quantity,
            };
            LineItem::new(local_item.product.clone(), quantity)
        })
        .collect()
}

/// Identifies one login transition. Derived from the account and the
/// sign-in time, so every token of the same session maps to the same merge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeToken(String);

impl MergeToken {
    pub fn for_login(account: &VerifiedAccount) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(account.user_id.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(account.login_generation.to_be_bytes());
        Self(URL_SAFE_NO_PAD.encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Answer of the merge ledger to a claim on a [`MergeToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeClaim {
    /// The caller now owns the merge and must mark it applied or release it.
    Granted,
    InProgress,
    AlreadyApplied,
}

/// What a merge request ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No verified identity; the local cart stays authoritative.
    NotEligible,
    NothingToMerge,
    AlreadyApplied,
    InProgress,
    /// `local_kept` is set when the local cart could not be removed after
    /// the remote write; the client should clear its copy.
    Merged { items: usize, local_kept: bool },
}
