//! Top-level table error

use super::ConfigError;
use super::StorageError;

/// Any error a [`TableController`](crate::TableController) operation can return.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Invalid configuration for the requested operation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The state storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A state snapshot could not be encoded or decoded.
    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
