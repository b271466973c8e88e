use crate::domain::auth::identity::AuthIdentity;
use crate::domain::shared::value_objects::{BrowserProfile, UserId};

use super::model::{Cart, LineItem};
use super::value_objects::Money;

/// The store currently treated as the source of truth for a shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAuthority {
    Local(BrowserProfile),
    Remote(UserId),
}

impl CartAuthority {
    pub fn is_remote(&self) -> bool {
        matches!(self, CartAuthority::Remote(_))
    }
}

impl std::fmt::Display for CartAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartAuthority::Local(profile) => write!(f, "local:{}", profile),
            CartAuthority::Remote(user_id) => write!(f, "remote:{}", user_id),
        }
    }
}

/// Everything a cart operation needs to know about the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartContext {
    pub profile: BrowserProfile,
    pub identity: Option<AuthIdentity>,
}

impl CartContext {
    pub fn new(profile: BrowserProfile, identity: Option<AuthIdentity>) -> Self {
        Self { profile, identity }
    }

    /// Remote only for verified accounts; anonymous sessions and missing
    /// identities stay on the browser-local cart.
    pub fn authority(&self) -> CartAuthority {
        match self.identity.as_ref().and_then(AuthIdentity::verified) {
            Some(account) => CartAuthority::Remote(account.user_id.clone()),
            None => CartAuthority::Local(self.profile.clone()),
        }
    }
}

/// Read model handed to callers: items plus the derived figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub authority: CartAuthority,
    pub items: Vec<LineItem>,
    pub item_count: u64,
    pub total: Money,
}

impl CartSummary {
    pub fn of(authority: CartAuthority, cart: &Cart) -> Self {
        Self {
            authority,
            items: cart.items().to_vec(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}
