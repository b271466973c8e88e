use crate::domain::cart::value_objects::{Money, ProductId};

pub const DEFAULT_LIMIT: usize = 3;
pub const MAX_LIMIT: usize = 10;

/// A product the shopper looked at, as sent to the recommender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowsedProduct {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub category: Option<String>,
}
