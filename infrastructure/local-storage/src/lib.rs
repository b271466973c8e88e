pub mod file_store;
pub mod record;

pub use file_store::FileCartStore;
