//! Error types shared by the NFTree frontend and CLI.
//!
//! - [`IndexerError`] - GraphQL indexer transport and decoding errors
//! - [`StoreError`] - Key-value cache errors
//! - [`VaultError`] - Vault call encoding errors
//! - [`CoreError`] - Top-level umbrella
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Indexer Errors
// =============================================================================

/// Errors from the GraphQL indexer.
#[derive(Debug, Error)]
pub enum IndexerError {
    /// Request could not be sent or the connection failed.
    #[error("Indexer request failed: {0}")]
    Http(String),

    /// Indexer answered with a non-success HTTP status.
    #[error("Indexer returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Indexer answered with GraphQL errors.
    #[error("Indexer query failed: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// Response body was not the expected JSON.
    #[error("Invalid indexer response: {0}")]
    Decode(String),

    /// Response had neither `data` nor `errors`.
    #[error("Indexer response carried no data")]
    MissingData,
}

impl From<serde_json::Error> for IndexerError {
    fn from(err: serde_json::Error) -> Self {
        IndexerError::Decode(err.to_string())
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors from the attestation cache and its backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No storage backend is reachable (e.g. storage disabled in the browser).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Backend rejected a read or a write.
    #[error("Storage error: {0}")]
    Backend(String),

    /// A stored value is not valid JSON for its key.
    #[error("Corrupt cache entry '{key}': {message}")]
    Corrupt { key: String, message: String },

    /// IO error from a file-backed store.
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Vault Errors
// =============================================================================

/// Errors while building a `vote` call.
#[derive(Debug, Error, PartialEq)]
pub enum VaultError {
    /// Token id is not a base-10 unsigned integer.
    #[error("Invalid token id: {0}")]
    InvalidTokenId(String),

    /// Address is not a 20-byte hex address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

// =============================================================================
// Core Errors (top-level)
// =============================================================================

/// Umbrella error for callers that mix layers.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Indexer error.
    #[error("Indexer error: {0}")]
    Indexer(#[from] IndexerError),

    /// Cache error.
    #[error("Cache error: {0}")]
    Store(#[from] StoreError),

    /// Vault call error.
    #[error("Vault error: {0}")]
    Vault(#[from] VaultError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for indexer operations.
pub type IndexerResult<T> = Result<T, IndexerError>;

/// Result type for cache operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for vault call encoding.
pub type VaultResult<T> = Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let store_err = StoreError::Unavailable("localStorage disabled".into());
        let core_err: CoreError = store_err.into();
        assert!(core_err.to_string().contains("localStorage disabled"));

        let vault_err = VaultError::InvalidTokenId("abc".into());
        let core_err: CoreError = vault_err.into();
        assert!(core_err.to_string().contains("abc"));
    }

    #[test]
    fn test_graphql_errors_are_joined() {
        let err = IndexerError::GraphQl(vec!["bad field".into(), "timeout".into()]);
        assert_eq!(err.to_string(), "Indexer query failed: bad field; timeout");
    }

    #[test]
    fn test_json_error_becomes_decode() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: IndexerError = json_err.into();
        assert!(matches!(err, IndexerError::Decode(_)));
    }
}
