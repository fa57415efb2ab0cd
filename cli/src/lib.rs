//! # nftree - command-line companion for NFTree
//!
//! Reads the same indexer and the same attestation cache format as the
//! browser app, so collections can be inspected and the cache edited from
//! a terminal. Vote transactions are only ever signed in the browser.
//!
//! ## Modules
//!
//! - [`config`] - Defaults for endpoints and paths
//! - [`error`] - Command errors
//! - [`http`] - `reqwest` indexer client and image probe
//! - [`store`] - File-backed key-value store
//! - [`report`] - Terminal tables

pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod report;

pub use error::{CommandError, CommandResult};
pub use http::{probe_image, HttpIndexer};
pub use store::FileStore;
