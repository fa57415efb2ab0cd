//! Collection artwork resolution.

/// Shown when a collection has no usable artwork.
pub const PLACEHOLDER_IMAGE: &str = "/nftree.jpg";

/// Public gateway used for `ipfs://` URIs.
pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// Result of probing an image URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The URL answered with a non-empty body.
    Found,
    /// The URL answered, but with no data.
    Empty,
    /// The request failed.
    Failed,
}

/// Browser-loadable URL for an image URI, or the placeholder.
pub fn resolve_image_uri(uri: Option<&str>, gateway: &str) -> String {
    match uri.map(str::trim) {
        None | Some("") => PLACEHOLDER_IMAGE.to_string(),
        Some(uri) => match uri.strip_prefix("ipfs://") {
            Some(path) => format!(
                "{}/{}",
                gateway.trim_end_matches('/'),
                path.trim_start_matches("ipfs/")
            ),
            None => uri.to_string(),
        },
    }
}

/// Image to display once the probe has answered.
pub fn image_after_probe(resolved: &str, outcome: ProbeOutcome) -> String {
    match outcome {
        ProbeOutcome::Found => resolved.to_string(),
        ProbeOutcome::Empty | ProbeOutcome::Failed => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// Outcome known from a `Content-Length` header alone, without the body.
///
/// `None` when the length is missing and the body has to be read.
pub fn outcome_from_length(content_length: Option<u64>) -> Option<ProbeOutcome> {
    match content_length {
        Some(0) => Some(ProbeOutcome::Empty),
        Some(_) => Some(ProbeOutcome::Found),
        None => None,
    }
}

/// Whether a probe is worth sending for a resolved URL.
pub fn needs_probe(resolved: &str) -> bool {
    resolved != PLACEHOLDER_IMAGE
}
