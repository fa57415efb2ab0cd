//! Command errors.

use nftree_core::{IndexerError, StoreError};
use thiserror::Error;

/// Errors surfaced by `nftree` subcommands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Indexer query failed.
    #[error("Indexer error: {0}")]
    Indexer(#[from] IndexerError),

    /// Cache read or write failed.
    #[error("Cache error: {0}")]
    Store(#[from] StoreError),

    /// Edition address unknown to the indexer.
    #[error("No indexed project for edition {0}")]
    UnknownEdition(String),
}

/// Result type for subcommands.
pub type CommandResult<T> = Result<T, CommandError>;
