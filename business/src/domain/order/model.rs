use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::cart::model::Cart;
use crate::domain::cart::value_objects::Money;
use crate::domain::shared::value_objects::UserId;

use super::errors::OrderError;
use super::value_objects::{CustomerDetails, OrderItemSnapshot, OrderStatus};

/// A placed order. Only `status` may change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: Uuid,
    pub user_id: UserId,
    pub items: Vec<OrderItemSnapshot>,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub customer_details: CustomerDetails,
    /// Assigned by the store.
    pub order_date: DateTime<Utc>,
}

/// An order ready to be stored; the store assigns the timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub id: Uuid,
    pub user_id: UserId,
    pub items: Vec<OrderItemSnapshot>,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub customer_details: CustomerDetails,
}

impl NewOrder {
    /// Snapshots the cart and computes the total once.
    pub fn from_cart(
        user_id: UserId,
        cart: &Cart,
        customer_details: CustomerDetails,
    ) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            items: cart.items().iter().map(OrderItemSnapshot::from).collect(),
            total_amount: cart.total(),
            status: OrderStatus::Pending,
            customer_details,
        })
    }

    pub fn placed_at(self, order_date: DateTime<Utc>) -> Order {
        Order {
            id: self.id,
            user_id: self.user_id,
            items: self.items,
            total_amount: self.total_amount,
            status: self.status,
            customer_details: self.customer_details,
            order_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::value_objects::{ProductId, ProductSnapshot};

    fn details() -> CustomerDetails {
        CustomerDetails {
            full_name: "Ana".to_string(),
            address: "Rua da Sé 100, Maputo".to_string(),
            phone: None,
            notes: None,
        }
    }

    #[test]
    fn should_snapshot_items_and_total() {
        let mut cart = Cart::new();
        let product = ProductSnapshot::new(
            ProductId::new("x").unwrap(),
            "Capulana".to_string(),
            Money::from_f64(100.0).unwrap(),
            Some("capulana.jpg".to_string()),
            None,
        )
        .unwrap();
        cart.add_product(product.clone());
        cart.add_product(product);

        let order = NewOrder::from_cart(UserId::new("u1"), &cart, details()).unwrap();

        assert_eq!(order.total_amount, Money::from_f64(200.0).unwrap());
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity.get(), 2);
        assert_eq!(order.items[0].image.as_deref(), Some("capulana.jpg"));
    }

    #[test]
    fn should_not_follow_later_cart_changes() {
        let mut cart = Cart::new();
        cart.add_product(
            ProductSnapshot::new(
                ProductId::new("x").unwrap(),
                "Capulana".to_string(),
                Money::from_f64(100.0).unwrap(),
                None,
                None,
            )
            .unwrap(),
        );
        let order = NewOrder::from_cart(UserId::new("u1"), &cart, details()).unwrap();

        cart.set_quantity(&ProductId::new("x").unwrap(), 9).unwrap();

        assert_eq!(order.items[0].quantity.get(), 1);
        assert_eq!(order.total_amount, Money::from_f64(100.0).unwrap());
    }

    #[test]
    fn should_keep_snapshot_price_when_product_is_repriced_in_cart() {
        let capulana = |price: f64| {
            ProductSnapshot::new(
                ProductId::new("x").unwrap(),
                "Capulana".to_string(),
                Money::from_f64(price).unwrap(),
                None,
                None,
            )
            .unwrap()
        };
        let mut cart = Cart::new();
        cart.add_product(capulana(100.0));
        cart.add_product(capulana(100.0));
        let order = NewOrder::from_cart(UserId::new("u1"), &cart, details()).unwrap();

        cart.remove(&ProductId::new("x").unwrap());
        cart.add_product(capulana(175.0));
        cart.add_product(capulana(175.0));
        cart.add_product(capulana(175.0));

        assert_eq!(cart.total(), Money::from_f64(525.0).unwrap());
        assert_eq!(order.items[0].price, Money::from_f64(100.0).unwrap());
        assert_eq!(order.items[0].quantity.get(), 2);
        assert_eq!(order.total_amount, Money::from_f64(200.0).unwrap());
    }

    #[test]
    fn should_reject_empty_cart() {
        let result = NewOrder::from_cart(UserId::new("u1"), &Cart::new(), details());
        assert_eq!(result, Err(OrderError::EmptyCart));
    }
}
