//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Shared State** - Reactive state provided through context
//! - **Error Types** - Frontend error handling

use leptos::*;
use nftree_core::{address_key, AttestationCache, HomeData, IndexerError};
use std::fmt;

use crate::services::storage::BrowserStore;

// =============================================================================
// Shared State
// =============================================================================

/// Connected wallet account, shared by the header and every row.
#[derive(Clone, Copy, Debug)]
pub struct WalletState {
    /// Connected account, if any
    pub address: RwSignal<Option<String>>,
}

impl WalletState {
    pub fn new() -> Self {
        Self {
            address: create_rw_signal(None),
        }
    }
}

impl Default for WalletState {
    fn default() -> Self {
        Self::new()
    }
}

/// Last home page load, reused by the details route.
#[derive(Clone, Copy, Debug)]
pub struct HomeState {
    pub data: RwSignal<Option<HomeData>>,
}

impl HomeState {
    pub fn new() -> Self {
        Self {
            data: create_rw_signal(None),
        }
    }
}

impl Default for HomeState {
    fn default() -> Self {
        Self::new()
    }
}

/// Editions attested on this device, shared by every row so two tokens of
/// the same edition settle together.
#[derive(Clone, Copy, Debug)]
pub struct AttestedEditions {
    /// Lowercased edition addresses
    keys: RwSignal<Vec<String>>,
}

impl AttestedEditions {
    pub fn new(editions: &[String]) -> Self {
        let mut keys: Vec<String> = Vec::with_capacity(editions.len());
        for key in editions.iter().map(|e| address_key(e)) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        Self {
            keys: create_rw_signal(keys),
        }
    }

    /// Tracked read: callers rerun when an edition is added.
    pub fn contains(&self, edition_address: &str) -> bool {
        let key = address_key(edition_address);
        self.keys.with(|keys| keys.contains(&key))
    }

    pub fn insert(&self, edition_address: &str) {
        let key = address_key(edition_address);
        if self.keys.with_untracked(|keys| keys.contains(&key)) {
            return;
        }
        self.keys.update(|keys| keys.push(key));
    }
}

/// Attestation cache backed by browser storage.
pub type BrowserCache = AttestationCache<BrowserStore>;

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
///
/// Unified error type for all frontend operations.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// Indexer query failed.
    Indexer(String),
    /// Wallet connection failed.
    Wallet(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Indexer(msg) => write!(f, "Indexer error: {}", msg),
            AppError::Wallet(msg) => write!(f, "Wallet error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<IndexerError> for AppError {
    fn from(err: IndexerError) -> Self {
        AppError::Indexer(err.to_string())
    }
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attested_editions_shared_between_copies() {
        let runtime = create_runtime();

        let editions = AttestedEditions::new(&["0xAbC".to_string(), "0xabc".to_string()]);
        let sibling = editions;
        assert!(editions.contains("0xABC"));
        assert!(!editions.contains("0xdef"));

        sibling.insert("0xDEF");
        sibling.insert("0xdef");
        assert!(editions.contains("0xdef"));
        assert_eq!(editions.keys.with_untracked(|k| k.len()), 2);

        runtime.dispose();
    }

    #[test]
    fn test_indexer_error_conversion() {
        let err: AppError = IndexerError::MissingData.into();
        assert_eq!(err, AppError::Indexer("Indexer response carried no data".into()));
        assert!(err.to_string().starts_with("Indexer error:"));
    }

    #[test]
    fn test_wallet_error_display() {
        let err = AppError::Wallet("No Ethereum wallet found".into());
        assert_eq!(err.to_string(), "Wallet error: No Ethereum wallet found");
    }
}
