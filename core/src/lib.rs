//! # NFTree core - collections, attestations and their cache
//!
//! Target-independent logic shared by the Leptos frontend and the `nftree`
//! CLI. Nothing here performs I/O directly: the indexer, the wallet and the
//! key-value store are traits implemented by each target.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Indexer   │────▶│    Merge    │────▶│    Rows     │────▶│   Attest    │
//! │  (GraphQL)  │     │ (+ pending) │     │  (images)   │     │ (vote call) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────┬──────┘
//!                            ▲                                       │
//!                            └────────── AttestationCache ◀──────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per layer
//! - [`models`] - Projects, owned tokens, collection rows
//! - [`indexer`] - GraphQL queries and the [`Indexer`] trait
//! - [`home`] - Home page merge and loading
//! - [`cache`] - Key-value store and attestation cache
//! - [`vault`] - `vote` call encoding
//! - [`attestation`] - Attestation lifecycle and error classification
//! - [`image`] - Artwork resolution and placeholder fallback

pub mod error;
pub mod models;

// Data sources
pub mod indexer;
pub mod home;

// Local state
pub mod cache;

// Transactions
pub mod vault;
pub mod attestation;

pub mod image;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CoreError, IndexerError, IndexerResult, StoreError, StoreResult, VaultError};

pub use models::{address_key, Collection, OwnedToken, Project, ProjectIndex, Vault};

pub use indexer::{decode_owned_tokens, decode_projects, GraphQlRequest, Indexer};

pub use home::{load_home, merge_owned, HomeData};

pub use cache::{AttestationCache, KeyValueStore, MemoryStore};

pub use vault::{VoteTransaction, ATTESTATION_REVIEW};

pub use attestation::{
    attest, settle, AttestErrorKind, AttestStatus, ContractWriter, TxError, VoteRequest,
};

pub use image::{
    image_after_probe, needs_probe, outcome_from_length, resolve_image_uri, ProbeOutcome,
    PLACEHOLDER_IMAGE,
};
