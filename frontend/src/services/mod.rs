//! Indexer, wallet and storage services.
//!
//! # Services
//!
//! - [`indexer`] - GraphQL indexer over `fetch`
//! - [`wallet`] - EIP-1193 wallet connection
//! - [`vault`] - `vote` transactions and receipt polling
//! - [`storage`] - `localStorage`-backed attestation cache store
//! - [`image`] - Artwork probe
//!
//! # JavaScript Bindings
//!
//! Wallet calls go through `src/js/ethereum.js`.

pub mod indexer;
pub mod wallet;
pub mod vault;
pub mod storage;
pub mod image;

pub use indexer::*;
pub use wallet::*;
pub use vault::*;
pub use storage::*;
pub use image::*;
