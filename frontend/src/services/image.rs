//! Best-effort artwork probe.

use gloo_net::http::Request;
use nftree_core::{outcome_from_length, ProbeOutcome};

/// GET an image URL and report whether it returned data. Errors are logged.
///
/// The body is only read when the server sends no `Content-Length`.
pub async fn probe_image(url: &str) -> ProbeOutcome {
    let response = match Request::get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            log::warn!("Image probe failed for {}: {}", url, e);
            return ProbeOutcome::Failed;
        }
    };

    if !response.ok() {
        log::warn!("Image probe for {} returned {}", url, response.status());
        return ProbeOutcome::Failed;
    }

    let length = response
        .headers()
        .get("content-length")
        .and_then(|v| v.trim().parse::<u64>().ok());
    if let Some(outcome) = outcome_from_length(length) {
        return outcome;
    }

    match response.binary().await {
        Ok(bytes) if bytes.is_empty() => ProbeOutcome::Empty,
        Ok(_) => ProbeOutcome::Found,
        Err(e) => {
            log::warn!("Image probe body failed for {}: {}", url, e);
            ProbeOutcome::Failed
        }
    }
}
