#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("cart.product_id_empty")]
    ProductIdEmpty,
    #[error("cart.product_name_empty")]
    ProductNameEmpty,
    #[error("cart.invalid_quantity")]
    InvalidQuantity,
    #[error("cart.invalid_price")]
    InvalidPrice,
    #[error("cart.not_watchable")]
    NotWatchable,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
