use poem_openapi::Object;

use business::domain::cart::errors::CartError;
use business::domain::cart::value_objects::{Money, ProductId};
use business::domain::recommendation::model::BrowsedProduct;

#[derive(Debug, Clone, Object)]
pub struct BrowsedProductRequest {
    pub id: String,
    pub name: String,
    #[oai(skip_serializing_if_is_none)]
    pub description: Option<String>,
    pub price: f64,
    #[oai(skip_serializing_if_is_none)]
    pub category: Option<String>,
}

impl TryFrom<BrowsedProductRequest> for BrowsedProduct {
    type Error = CartError;

    fn try_from(request: BrowsedProductRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(request.id)?,
            name: request.name,
            description: request.description,
            price: Money::from_f64(request.price)?,
            category: request.category,
        })
    }
}

#[derive(Debug, Clone, Object)]
pub struct RecommendRequest {
    /// Products the shopper viewed, most relevant first
    pub history: Vec<BrowsedProductRequest>,
    /// Free-text preferences, e.g. "artesanato, presentes"
    #[oai(skip_serializing_if_is_none)]
    pub preferences: Option<String>,
    /// Between 1 and 10; defaults to 3
    #[oai(skip_serializing_if_is_none)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Object)]
pub struct RecommendResponse {
    /// Recommended product ids, none of them from the history
    pub product_ids: Vec<String>,
}
