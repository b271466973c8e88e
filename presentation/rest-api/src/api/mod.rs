pub mod cart;
pub mod error;
pub mod health;
pub mod order;
pub mod recommendation;
pub mod security;
pub mod tags;
