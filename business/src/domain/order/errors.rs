#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("order.not_authenticated")]
    NotAuthenticated,
    #[error("order.email_not_verified")]
    EmailNotVerified,
    #[error("order.empty_cart")]
    EmptyCart,
    #[error("order.customer_name_too_short")]
    CustomerNameTooShort,
    #[error("order.address_too_short")]
    AddressTooShort,
    #[error("order.not_found")]
    NotFound,
    /// The order exists but the cart still holds its items.
    #[error("order.cart_not_cleared")]
    CartNotCleared { order_id: uuid::Uuid },
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
