use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use business::domain::cart::model::LineItem;
use business::domain::cart::repository::LocalCartStore;
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::BrowserProfile;

use crate::record::StoredCartItem;

/// Key the cart is stored under inside a profile's storage.
pub const CART_KEY: &str = "bazar-pt-cart";

/// Browser-profile storage on disk: one directory per profile, one JSON file
/// per key. Writes replace the whole file through a rename and are
/// serialised per profile.
pub struct FileCartStore {
    root: PathBuf,
    writers: Mutex<HashMap<BrowserProfile, Arc<tokio::sync::Mutex<()>>>>,
}

impl FileCartStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            writers: Mutex::new(HashMap::new()),
        }
    }

    pub async fn ensure_root(&self) -> Result<(), RepositoryError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| storage_error(&self.root, e))
    }

    fn path_for(&self, profile: &BrowserProfile) -> PathBuf {
        self.root
            .join(profile.as_str())
            .join(format!("{}.json", CART_KEY))
    }

    fn writer_for(&self, profile: &BrowserProfile) -> Arc<tokio::sync::Mutex<()>> {
        let mut writers = self
            .writers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writers.entry(profile.clone()).or_default().clone()
    }
}

/// A staging file next to `path` that no other write shares.
fn staging_path(path: &Path) -> PathBuf {
    path.with_extension(format!("json.{}.tmp", Uuid::new_v4().simple()))
}

fn storage_error(path: &Path, error: std::io::Error) -> RepositoryError {
    tracing::error!("Local cart storage at {} failed: {}", path.display(), error);
    RepositoryError::StorageError
}

#[async_trait]
impl LocalCartStore for FileCartStore {
    async fn load(&self, profile: &BrowserProfile) -> Result<Vec<LineItem>, RepositoryError> {
        let path = self.path_for(profile);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(storage_error(&path, e)),
        };

        // An unreadable cart starts over empty; the next write replaces it.
        let stored: Vec<StoredCartItem> = match serde_json::from_slice(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Discarding unreadable local cart {}: {}", path.display(), e);
                return Ok(vec![]);
            }
        };

        let total = stored.len();
        let items: Vec<LineItem> = stored
            .into_iter()
            .filter_map(StoredCartItem::into_domain)
            .collect();
        if items.len() < total {
            tracing::warn!(
                "Skipped {} invalid entries in local cart of {}",
                total - items.len(),
                profile
            );
        }
        Ok(items)
    }

    async fn save(
        &self,
        profile: &BrowserProfile,
        items: &[LineItem],
    ) -> Result<(), RepositoryError> {
        let path = self.path_for(profile);
        let stored: Vec<StoredCartItem> = items.iter().map(StoredCartItem::from).collect();
        let json = serde_json::to_vec(&stored).map_err(|e| {
            tracing::error!("Could not serialise local cart of {}: {}", profile, e);
            RepositoryError::StorageError
        })?;

        let writer = self.writer_for(profile);
        let _writing = writer.lock().await;

        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| storage_error(dir, e))?;
        }
        let staging = staging_path(&path);
        if let Err(e) = tokio::fs::write(&staging, json).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(storage_error(&staging, e));
        }
        if let Err(e) = tokio::fs::rename(&staging, &path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(storage_error(&path, e));
        }
        Ok(())
    }

    async fn remove(&self, profile: &BrowserProfile) -> Result<(), RepositoryError> {
        let path = self.path_for(profile);
        let writer = self.writer_for(profile);
        let _writing = writer.lock().await;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(&path, e)),
        }
    }
}
