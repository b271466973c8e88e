use std::path::PathBuf;

const DEFAULT_DIR: &str = "data/carts";

/// Where browser-profile carts are kept.
///
/// Environment variables:
/// - CART_STORAGE_DIR: Root directory (default: "data/carts")
pub struct LocalStorageConfig {
    pub root: PathBuf,
}

impl LocalStorageConfig {
    pub fn from_env() -> Self {
        Self::from_value(std::env::var("CART_STORAGE_DIR").ok())
    }

    fn from_value(raw: Option<String>) -> Self {
        let root = raw
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_DIR.to_string());
        Self {
            root: PathBuf::from(root),
        }
    }
}
