use std::iter::Sum;

use bigdecimal::{BigDecimal, RoundingMode};
use num_traits::{FromPrimitive, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use super::errors::CartError;

/// Catalog identifier of a product; doubles as the line-item key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Result<Self, CartError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(CartError::ProductIdEmpty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A line-item quantity. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);
    /// Largest quantity a cart line can hold; the `cart_items.quantity`
    /// column is an `INT`.
    pub const MAX: Quantity = Quantity(i32::MAX as u32);

    /// `None` for zero, negative or larger than [`Quantity::MAX`].
    pub fn new(value: i64) -> Option<Self> {
        if value < 1 || value > i64::from(Self::MAX.0) {
            return None;
        }
        u32::try_from(value).ok().map(Self)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn saturating_add(self, other: Quantity) -> Quantity {
        Quantity(self.0.saturating_add(other.0).min(Self::MAX.0))
    }

    pub fn increment(self) -> Quantity {
        self.saturating_add(Quantity::ONE)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Quantity::new(value).ok_or_else(|| format!("Invalid quantity: {}", value))
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl From<Quantity> for i32 {
    fn from(quantity: Quantity) -> Self {
        // Never above `Quantity::MAX`, so the cast is lossless.
        quantity.0 as i32
    }
}

/// An amount in meticais (MZN), kept at two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(BigDecimal);

impl Money {
    const SCALE: i64 = 2;

    pub fn new(amount: BigDecimal) -> Result<Self, CartError> {
        if amount < BigDecimal::zero() {
            return Err(CartError::InvalidPrice);
        }
        Ok(Self(amount.with_scale_round(Self::SCALE, RoundingMode::HalfUp)))
    }

    /// Rejects NaN, infinities and negative values.
    pub fn from_f64(amount: f64) -> Result<Self, CartError> {
        if !amount.is_finite() {
            return Err(CartError::InvalidPrice);
        }
        let decimal = BigDecimal::from_f64(amount).ok_or(CartError::InvalidPrice)?;
        Self::new(decimal)
    }

    pub fn zero() -> Self {
        Self(BigDecimal::zero().with_scale(Self::SCALE))
    }

    pub fn amount(&self) -> &BigDecimal {
        &self.0
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    pub fn times(&self, quantity: Quantity) -> Money {
        let product = &self.0 * BigDecimal::from(quantity.get());
        Self(product.with_scale_round(Self::SCALE, RoundingMode::HalfUp))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MT{}", self.0)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, money| Money(acc.0 + &money.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, money| Money(acc.0 + money.0))
    }
}

/// Product fields denormalised into the cart when the item is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub image: Option<String>,
    pub category: Option<String>,
}

impl ProductSnapshot {
    pub fn new(
        id: ProductId,
        name: String,
        price: Money,
        image: Option<String>,
        category: Option<String>,
    ) -> Result<Self, CartError> {
        if name.trim().is_empty() {
            return Err(CartError::ProductNameEmpty);
        }
        Ok(Self {
            id,
            name: name.trim().to_string(),
            price,
            image: image.filter(|i| !i.trim().is_empty()),
            category: category.filter(|c| !c.trim().is_empty()),
        })
    }
}
