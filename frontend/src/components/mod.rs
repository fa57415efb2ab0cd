//! UI components.
//!
//! # Layout Components
//! - [`Header`] - Navigation bar with wallet connection
//! - [`HomeCta`] - Banner above the collections table
//! - [`Footer`] - Page footer
//!
//! # Pages
//! - [`HomePage`] - Owned collections with attest buttons
//! - [`CollectionDetail`] - One collection, reached from a row link
//!
//! # Feature Components
//! - [`AttestRow`] - One collection row and its attestation lifecycle
//! - [`TableShimmer`] - Loading placeholder

mod header;
mod home_cta;
mod footer;
mod home;
mod attest_row;
mod table_shimmer;
mod collection_detail;

pub use header::*;
pub use home_cta::*;
pub use footer::*;
pub use home::*;
pub use attest_row::*;
pub use table_shimmer::*;
pub use collection_detail::*;
