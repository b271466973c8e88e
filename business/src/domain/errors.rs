/// Persistence errors raised by store adapters (`PersistenceError` in the
/// storefront taxonomy). Code-style identifiers for i18n compatibility.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.not_found")]
    NotFound,
    #[error("repository.database_error")]
    DatabaseError,
    #[error("repository.storage_error")]
    StorageError,
    #[error("repository.invalid_record")]
    InvalidRecord,
    #[error("repository.batch_failed")]
    BatchFailed,
}

impl RepositoryError {
    /// Notice code shown to the shopper when a write of this kind fails.
    pub fn notice(&self) -> &'static str {
        match self {
            RepositoryError::NotFound => "cart.sync_not_found",
            RepositoryError::DatabaseError | RepositoryError::BatchFailed => {
                "cart.sync_failed"
            }
            RepositoryError::StorageError | RepositoryError::InvalidRecord => {
                "cart.local_storage_failed"
            }
        }
    }
}
