use chrono::{DateTime, Utc};
use poem_openapi::Object;

use business::domain::order::model::Order;
use business::domain::order::value_objects::{CustomerDetails, OrderItemSnapshot};

#[derive(Debug, Clone, Object)]
pub struct PlaceOrderRequest {
    /// At least two characters
    pub full_name: String,
    /// At least ten characters
    pub address: String,
    #[oai(skip_serializing_if_is_none)]
    pub phone: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub notes: Option<String>,
}

impl From<PlaceOrderRequest> for CustomerDetails {
    fn from(request: PlaceOrderRequest) -> Self {
        Self {
            full_name: request.full_name,
            address: request.address,
            phone: request.phone,
            notes: request.notes,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct CustomerDetailsResponse {
    pub full_name: String,
    pub address: String,
    #[oai(skip_serializing_if_is_none)]
    pub phone: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub notes: Option<String>,
}

impl From<CustomerDetails> for CustomerDetailsResponse {
    fn from(details: CustomerDetails) -> Self {
        Self {
            full_name: details.full_name,
            address: details.address,
            phone: details.phone,
            notes: details.notes,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct OrderItemResponse {
    pub product_id: String,
    pub name: String,
    /// Unit price at the time of the order
    pub price: f64,
    pub quantity: u32,
    pub subtotal: f64,
    #[oai(skip_serializing_if_is_none)]
    pub image: Option<String>,
}

impl From<OrderItemSnapshot> for OrderItemResponse {
    fn from(item: OrderItemSnapshot) -> Self {
        let subtotal = item.subtotal().to_f64();
        Self {
            product_id: item.product_id.to_string(),
            name: item.name,
            price: item.price.to_f64(),
            quantity: item.quantity.get(),
            subtotal,
            image: item.image,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct OrderResponse {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderItemResponse>,
    pub total_amount: f64,
    /// pending, processing, shipped, delivered or cancelled
    pub status: String,
    pub customer_details: CustomerDetailsResponse,
    pub order_date: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            user_id: order.user_id.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
            total_amount: order.total_amount.to_f64(),
            status: order.status.to_string(),
            customer_details: order.customer_details.into(),
            order_date: order.order_date,
        }
    }
}
