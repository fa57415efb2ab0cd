//! Application configuration.
//!
//! Centralized configuration for the NFTree frontend. The indexer URL can
//! be overridden at build time with `NFTREE_INDEXER_URL`.

/// GraphQL endpoint of the NFTree subgraph.
pub const INDEXER_URL: &str = match option_env!("NFTREE_INDEXER_URL") {
    Some(url) => url,
    None => "https://api.thegraph.com/subgraphs/name/nftree/nftree",
};

/// Gateway used to display `ipfs://` artwork.
pub const IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// Application name.
pub const APP_NAME: &str = "NFTree";

/// Delay between two transaction receipt polls (ms).
pub const RECEIPT_POLL_INTERVAL_MS: u32 = 2_000;

/// Receipt polls before giving up on a confirmation.
///
/// 150 polls at 2 s is five minutes.
pub const RECEIPT_MAX_POLLS: u32 = 150;
