//! State storage error types

use crate::state::StorageKind;

/// Errors raised by a [`StateStorage`](crate::state::StateStorage) backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// SQLite backend failure.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A lock guarding the backend was poisoned by a panicking writer.
    #[error("Storage lock poisoned")]
    Poisoned,

    /// The storage kind is valid but no backend was provided for it.
    #[error("No {0} storage backend is configured")]
    Unavailable(StorageKind),
}
