use uuid::Uuid;

use crate::domain::errors::RepositoryError;

use super::authority::CartSummary;
use super::value_objects::{ProductId, ProductSnapshot};

/// The requested change, kept so a failed mutation can be re-issued as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartMutationKind {
    AddItem(ProductSnapshot),
    RemoveItem(ProductId),
    SetQuantity { product_id: ProductId, quantity: i64 },
    Clear,
}

impl std::fmt::Display for CartMutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartMutationKind::AddItem(product) => write!(f, "add_item({})", product.id),
            CartMutationKind::RemoveItem(id) => write!(f, "remove_item({})", id),
            CartMutationKind::SetQuantity {
                product_id,
                quantity,
            } => write!(f, "set_quantity({}, {})", product_id, quantity),
            CartMutationKind::Clear => write!(f, "clear"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationState {
    Pending,
    Committed,
    /// `notice` is a code the client shows to the shopper.
    Failed { notice: String },
}

/// One cart write and where it ended up.
///
/// `summary` holds the cart the shopper should see: the cart after the write
/// once committed, the cart before it once failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartMutation {
    pub id: Uuid,
    pub kind: CartMutationKind,
    pub state: MutationState,
    pub summary: CartSummary,
}

impl CartMutation {
    pub fn pending(kind: CartMutationKind, before: CartSummary) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            state: MutationState::Pending,
            summary: before,
        }
    }

    pub fn commit(self, after: CartSummary) -> Self {
        Self {
            state: MutationState::Committed,
            summary: after,
            ..self
        }
    }

    pub fn fail(self, error: &RepositoryError) -> Self {
        Self {
            state: MutationState::Failed {
                notice: error.notice().to_string(),
            },
            ..self
        }
    }

    pub fn is_committed(&self) -> bool {
        self.state == MutationState::Committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::authority::CartAuthority;
    use crate::domain::cart::model::Cart;
    use crate::domain::shared::value_objects::BrowserProfile;

    fn summary(count: usize) -> CartSummary {
        let mut cart = Cart::new();
        for i in 0..count {
            cart.add_product(
                ProductSnapshot::new(
                    ProductId::new(format!("p{}", i)).unwrap(),
                    "Item".to_string(),
                    crate::domain::cart::value_objects::Money::zero(),
                    None,
                    None,
                )
                .unwrap(),
            );
        }
        CartSummary::of(
            CartAuthority::Local(BrowserProfile::parse("p").unwrap()),
            &cart,
        )
    }

    #[test]
    fn should_start_pending_with_previous_cart() {
        let mutation = CartMutation::pending(CartMutationKind::Clear, summary(2));
        assert_eq!(mutation.state, MutationState::Pending);
        assert_eq!(mutation.summary.items.len(), 2);
    }

    #[test]
    fn should_expose_new_cart_once_committed() {
        let mutation = CartMutation::pending(CartMutationKind::Clear, summary(2)).commit(summary(0));
        assert!(mutation.is_committed());
        assert!(mutation.summary.items.is_empty());
    }

    #[test]
    fn should_keep_previous_cart_and_notice_when_failed() {
        let pending = CartMutation::pending(CartMutationKind::Clear, summary(2));
        let id = pending.id;
        let failed = pending.fail(&RepositoryError::DatabaseError);

        assert_eq!(failed.id, id);
        assert_eq!(
            failed.state,
            MutationState::Failed {
                notice: "cart.sync_failed".to_string()
            }
        );
        assert_eq!(failed.summary.items.len(), 2);
    }
}
