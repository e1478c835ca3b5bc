//! State persistence: snapshots and pluggable key-value storage.
//!
//! A [`StatePersistence`] writes one [`StateSnapshot`] as JSON under a state
//! key in a [`StateStorage`] backend. Backends are picked by
//! [`StorageKind`]: `session` resolves to the process-wide
//! [`MemoryStorage`], `local` to a durable backend such as
//! [`SqliteStorage`].

mod memory;
mod snapshot;
mod sqlite;

pub use memory::*;
pub use snapshot::*;
pub use sqlite::*;

use std::str::FromStr;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::error::StorageError;
use crate::error::TableError;

/// Synchronous key-value storage for table state.
pub trait StateStorage: Send + Sync {
    /// Reads the value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the value stored under `key`.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Lifetime class of a storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    /// Lives as long as the process.
    #[default]
    Session,
    /// Survives restarts.
    Local,
}

impl FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "session" => Ok(StorageKind::Session),
            "local" => Ok(StorageKind::Local),
            other => Err(ConfigError::InvalidStorageKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKind::Session => f.write_str("session"),
            StorageKind::Local => f.write_str("local"),
        }
    }
}

/// The backends available to a table, one per [`StorageKind`].
#[derive(Clone)]
pub struct StorageSet {
    session: Arc<dyn StateStorage>,
    local: Option<Arc<dyn StateStorage>>,
}

impl Default for StorageSet {
    fn default() -> Self {
        Self {
            session: MemoryStorage::session(),
            local: None,
        }
    }
}

impl StorageSet {
    /// Session storage only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the session backend.
    pub fn with_session(mut self, storage: Arc<dyn StateStorage>) -> Self {
        self.session = storage;
        self
    }

    /// Sets the durable backend.
    pub fn with_local(mut self, storage: Arc<dyn StateStorage>) -> Self {
        self.local = Some(storage);
        self
    }

    /// Returns the backend for `kind`.
    pub fn resolve(&self, kind: StorageKind) -> Result<Arc<dyn StateStorage>, StorageError> {
        match kind {
            StorageKind::Session => Ok(self.session.clone()),
            StorageKind::Local => self.local.clone().ok_or(StorageError::Unavailable(kind)),
        }
    }
}

impl std::fmt::Debug for StorageSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageSet")
            .field("local", &self.local.is_some())
            .finish_non_exhaustive()
    }
}

/// Saves and restores one table's snapshot.
#[derive(Clone)]
pub struct StatePersistence {
    key: String,
    storage: Arc<dyn StateStorage>,
}

impl StatePersistence {
    /// Creates a persistence handle over an explicit backend.
    pub fn new(key: impl Into<String>, storage: Arc<dyn StateStorage>) -> Self {
        Self {
            key: key.into(),
            storage,
        }
    }

    /// Resolves the backend named by `kind` in `storages`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidStorageKind`] for an unknown kind and
    /// [`StorageError::Unavailable`] when no backend serves it.
    pub fn from_kind(
        key: impl Into<String>,
        kind: &str,
        storages: &StorageSet,
    ) -> Result<Self, TableError> {
        let kind: StorageKind = kind.parse()?;
        let storage = storages.resolve(kind)?;
        Ok(Self::new(key, storage))
    }

    /// The state key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes the snapshot.
    pub fn save(&self, snapshot: &StateSnapshot) -> Result<(), TableError> {
        let json = serde_json::to_string(snapshot)?;
        self.storage.set_item(&self.key, &json)?;
        log::debug!("[state] saved '{}' ({} bytes)", self.key, json.len());
        Ok(())
    }

    /// Reads the snapshot, if one was saved.
    pub fn load(&self) -> Result<Option<StateSnapshot>, TableError> {
        let Some(json) = self.storage.get_item(&self.key)? else {
            log::debug!("[state] nothing saved under '{}'", self.key);
            return Ok(None);
        };
        let snapshot = serde_json::from_str(&json)?;
        log::debug!("[state] loaded '{}'", self.key);
        Ok(Some(snapshot))
    }

    /// Removes the snapshot.
    pub fn clear(&self) -> Result<(), TableError> {
        self.storage.remove_item(&self.key)?;
        log::debug!("[state] cleared '{}'", self.key);
        Ok(())
    }
}

impl std::fmt::Debug for StatePersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatePersistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
