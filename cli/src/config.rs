//! CLI configuration defaults.
//!
//! Every value can be overridden by a flag or an environment variable
//! (a `.env` file in the working directory is loaded first).

/// Default GraphQL endpoint of the NFTree subgraph.
pub const DEFAULT_INDEXER_URL: &str = "https://api.thegraph.com/subgraphs/name/nftree/nftree";

/// Directory holding the file-backed attestation cache (relative to current dir).
pub const DEFAULT_CACHE_DIR: &str = ".nftree";

/// File name of the cache inside the cache directory.
pub const CACHE_FILE_NAME: &str = "cache.json";

/// HTTP timeout for indexer and image requests, in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 20;
