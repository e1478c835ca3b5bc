//! Configuration error types

/// A table was asked to do something its configuration cannot support.
///
/// These are raised synchronously at the call site and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Global filtering was requested without an explicit field list and
    /// without columns to infer one from.
    #[error("Global filtering requires columns or global filter fields to be defined")]
    FilterMisconfigured,

    /// An operation that addresses rows by key ran without a data key.
    #[error("A data key must be defined to use {operation}")]
    MissingIdentityKey {
        /// The operation that needed the key.
        operation: &'static str,
    },

    /// The configured storage kind is not one of the supported kinds.
    #[error("'{0}' is not a supported storage, use \"local\" or \"session\"")]
    InvalidStorageKind(String),

    /// Column resize on a scrollable layout without a column group.
    #[error("Scrollable tables require a column group to support resizable columns")]
    MissingColumnGroup,
}

impl ConfigError {
    /// Creates a missing identity key error for the given operation.
    pub fn missing_key(operation: &'static str) -> Self {
        Self::MissingIdentityKey { operation }
    }
}
