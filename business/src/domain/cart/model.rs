use super::errors::CartError;
use super::value_objects::{Money, ProductId, ProductSnapshot, Quantity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub product: ProductSnapshot,
    pub quantity: Quantity,
}

impl LineItem {
    pub fn new(product: ProductSnapshot, quantity: Quantity) -> Self {
        Self { product, quantity }
    }

    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    pub fn subtotal(&self) -> Money {
        self.product.price.times(self.quantity)
    }
}

/// What `Cart::set_quantity` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated(Quantity),
    Removed,
    /// The product was not in the cart; nothing changed.
    Absent,
}

/// Line items keyed by product id, in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from stored items. A repeated product id replaces the
    /// earlier entry in place.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            match cart.position(item.id()) {
                Some(index) => cart.items[index] = item,
                None => cart.items.push(item),
            }
        }
        cart
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Adds one unit. An existing line keeps its snapshot and gains one.
    pub fn add_product(&mut self, product: ProductSnapshot) -> &LineItem {
        let index = match self.position(&product.id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.increment();
                index
            }
            None => {
                self.items.push(LineItem::new(product, Quantity::ONE));
                self.items.len() - 1
            }
        };
        &self.items[index]
    }

    /// Overwrites the quantity; `quantity <= 0` removes the line. Values
    /// above [`Quantity::MAX`] are rejected and leave the cart untouched.
    pub fn set_quantity(
        &mut self,
        id: &ProductId,
        quantity: i64,
    ) -> Result<QuantityChange, CartError> {
        if quantity > i64::from(Quantity::MAX.get()) {
            return Err(CartError::InvalidQuantity);
        }
        let Some(index) = self.position(id) else {
            return Ok(QuantityChange::Absent);
        };
        Ok(match Quantity::new(quantity) {
            Some(quantity) => {
                self.items[index].quantity = quantity;
                QuantityChange::Updated(quantity)
            }
            None => {
                self.items.remove(index);
                QuantityChange::Removed
            }
        })
    }

    pub fn remove(&mut self, id: &ProductId) -> Option<LineItem> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of `price * quantity`.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: f64) -> ProductSnapshot {
        ProductSnapshot::new(
            ProductId::new(id).unwrap(),
            format!("Produto {}", id),
            Money::from_f64(price).unwrap(),
            None,
            None,
        )
        .unwrap()
    }

    fn pid(id: &str) -> ProductId {
        ProductId::new(id).unwrap()
    }

    #[test]
    fn should_insert_with_quantity_one() {
        let mut cart = Cart::new();
        let item = cart.add_product(product("a", 10.0));

        assert_eq!(item.quantity.get(), 1);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn should_increment_existing_item() {
        let mut cart = Cart::new();
        cart.add_product(product("a", 10.0));
        let item = cart.add_product(product("a", 99.0));

        assert_eq!(item.quantity.get(), 2);
        assert_eq!(item.product.price, Money::from_f64(10.0).unwrap());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn should_remove_when_quantity_not_positive() {
        let mut cart = Cart::new();
        cart.add_product(product("a", 10.0));

        assert_eq!(cart.set_quantity(&pid("a"), 0), Ok(QuantityChange::Removed));
        assert!(cart.is_empty());
    }

    #[test]
    fn should_ignore_quantity_change_for_missing_item() {
        let mut cart = Cart::new();
        assert_eq!(cart.set_quantity(&pid("ghost"), 3), Ok(QuantityChange::Absent));
        assert!(cart.is_empty());
    }

    #[test]
    fn should_reject_quantity_the_store_cannot_hold() {
        let mut cart = Cart::new();
        cart.add_product(product("a", 10.0));

        assert_eq!(
            cart.set_quantity(&pid("a"), 3_000_000_000),
            Err(CartError::InvalidQuantity)
        );
        assert_eq!(cart.get(&pid("a")).unwrap().quantity, Quantity::ONE);
    }

    #[test]
    fn should_remove_idempotently() {
        let mut cart = Cart::new();
        cart.add_product(product("a", 10.0));
        cart.add_product(product("b", 5.0));

        cart.remove(&pid("a"));
        let once = cart.clone();
        assert!(cart.remove(&pid("a")).is_none());
        assert_eq!(cart, once);
    }

    #[test]
    fn should_compute_count_and_total() {
        let mut cart = Cart::new();
        cart.add_product(product("a", 100.0));
        cart.add_product(product("a", 100.0));
        cart.add_product(product("b", 49.99));

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Money::from_f64(249.99).unwrap());
    }

    #[test]
    fn should_keep_last_duplicate_when_building_from_items() {
        let cart = Cart::from_items(vec![
            LineItem::new(product("a", 1.0), Quantity::new(1).unwrap()),
            LineItem::new(product("b", 1.0), Quantity::new(1).unwrap()),
            LineItem::new(product("a", 1.0), Quantity::new(5).unwrap()),
        ]);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].id().as_str(), "a");
        assert_eq!(cart.get(&pid("a")).unwrap().quantity.get(), 5);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(u8),
            Set(u8, i64),
            Remove(u8),
            Clear,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => (0u8..5).prop_map(Op::Add),
                3 => ((0u8..5), -3i64..6).prop_map(|(id, q)| Op::Set(id, q)),
                2 => (0u8..5).prop_map(Op::Remove),
                1 => Just(Op::Clear),
            ]
        }

        fn apply(cart: &mut Cart, op: &Op) {
            match op {
                Op::Add(id) => {
                    cart.add_product(product(&format!("p{}", id), f64::from(*id) + 0.5));
                }
                Op::Set(id, quantity) => {
                    cart.set_quantity(&pid(&format!("p{}", id)), *quantity).unwrap();
                }
                Op::Remove(id) => {
                    cart.remove(&pid(&format!("p{}", id)));
                }
                Op::Clear => cart.clear(),
            }
        }

        proptest! {
            #[test]
            fn count_and_total_follow_items(ops in proptest::collection::vec(op(), 0..40)) {
                let mut cart = Cart::new();
                for op in &ops {
                    apply(&mut cart, op);

                    let quantities: u64 = cart.items().iter().map(|i| u64::from(i.quantity.get())).sum();
                    prop_assert_eq!(cart.item_count(), quantities);
                    prop_assert!(cart.items().iter().all(|i| i.quantity.get() >= 1));

                    let expected: Money = cart.items().iter().map(LineItem::subtotal).sum();
                    prop_assert_eq!(cart.total(), expected);
                }
            }

            #[test]
            fn product_ids_stay_unique(ops in proptest::collection::vec(op(), 0..40)) {
                let mut cart = Cart::new();
                for op in &ops {
                    apply(&mut cart, op);
                }
                let mut ids: Vec<_> = cart.items().iter().map(|i| i.id().clone()).collect();
                ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
                ids.dedup();
                prop_assert_eq!(ids.len(), cart.len());
            }
        }
    }
}
