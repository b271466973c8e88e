use poem_openapi::Object;

use business::domain::cart::authority::{CartAuthority, CartSummary};
use business::domain::cart::errors::CartError;
use business::domain::cart::model::LineItem;
use business::domain::cart::mutation::{CartMutation, MutationState};
use business::domain::cart::reconciliation::MergeOutcome;
use business::domain::cart::value_objects::{Money, ProductId, ProductSnapshot};

#[derive(Debug, Clone, Object)]
pub struct AddCartItemRequest {
    /// Catalog product id
    pub product_id: String,
    pub name: String,
    /// Unit price in MZN
    pub price: f64,
    #[oai(skip_serializing_if_is_none)]
    pub image: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub category: Option<String>,
}

impl TryFrom<AddCartItemRequest> for ProductSnapshot {
    type Error = CartError;

    fn try_from(request: AddCartItemRequest) -> Result<Self, Self::Error> {
        ProductSnapshot::new(
            ProductId::new(request.product_id)?,
            request.name,
            Money::from_f64(request.price)?,
            request.image,
            request.category,
        )
    }
}

#[derive(Debug, Clone, Object)]
pub struct SetQuantityRequest {
    /// New quantity; zero or less removes the item
    pub quantity: i64,
}

#[derive(Debug, Clone, Object)]
pub struct CartItemResponse {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub subtotal: f64,
    #[oai(skip_serializing_if_is_none)]
    pub image: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub category: Option<String>,
}

impl From<LineItem> for CartItemResponse {
    fn from(item: LineItem) -> Self {
        let subtotal = item.subtotal().to_f64();
        Self {
            product_id: item.product.id.to_string(),
            name: item.product.name,
            price: item.product.price.to_f64(),
            quantity: item.quantity.get(),
            subtotal,
            image: item.product.image,
            category: item.product.category,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct CartSummaryResponse {
    /// "local" for the browser cart, "remote" for the account cart
    pub source: String,
    pub items: Vec<CartItemResponse>,
    /// Sum of all quantities
    pub item_count: u64,
    pub total: f64,
    /// Total formatted for display, e.g. "MT150.00"
    pub total_display: String,
}

impl From<CartSummary> for CartSummaryResponse {
    fn from(summary: CartSummary) -> Self {
        let source = match summary.authority {
            CartAuthority::Local(_) => "local",
            CartAuthority::Remote(_) => "remote",
        };
        Self {
            source: source.to_string(),
            item_count: summary.item_count,
            total: summary.total.to_f64(),
            total_display: summary.total.to_string(),
            items: summary.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct CartMutationResponse {
    pub id: String,
    /// The requested change, e.g. "set_quantity(capulana-01, 2)"
    pub operation: String,
    /// "committed" or "failed"
    pub state: String,
    /// Code of the notice to show when the change was not saved
    #[oai(skip_serializing_if_is_none)]
    pub notice: Option<String>,
    /// Cart after the change, or before it when the change failed
    pub cart: CartSummaryResponse,
}

impl From<CartMutation> for CartMutationResponse {
    fn from(mutation: CartMutation) -> Self {
        let (state, notice) = match mutation.state {
            MutationState::Pending => ("pending", None),
            MutationState::Committed => ("committed", None),
            MutationState::Failed { notice } => ("failed", Some(notice)),
        };
        Self {
            id: mutation.id.to_string(),
            operation: mutation.kind.to_string(),
            state: state.to_string(),
            notice,
            cart: mutation.summary.into(),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct MergeResponse {
    /// not_eligible, nothing_to_merge, already_applied, in_progress or merged
    pub outcome: String,
    /// Number of items written to the account cart
    pub merged_items: u64,
    /// The merged local cart could not be removed; the client should clear it
    pub local_kept: bool,
}

impl From<MergeOutcome> for MergeResponse {
    fn from(outcome: MergeOutcome) -> Self {
        let (outcome, merged_items, local_kept) = match outcome {
            MergeOutcome::NotEligible => ("not_eligible", 0, false),
            MergeOutcome::NothingToMerge => ("nothing_to_merge", 0, false),
            MergeOutcome::AlreadyApplied => ("already_applied", 0, false),
            MergeOutcome::InProgress => ("in_progress", 0, false),
            MergeOutcome::Merged { items, local_kept } => ("merged", items as u64, local_kept),
        };
        Self {
            outcome: outcome.to_string(),
            merged_items,
            local_kept,
        }
    }
}
