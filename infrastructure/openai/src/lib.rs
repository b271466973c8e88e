pub mod client;
pub mod product_recommender;
