//! HTTP clients: GraphQL indexer and image probe.

use std::time::Duration;

use nftree_core::indexer::{decode_owned_tokens, decode_projects, GraphQlRequest, Indexer};
use nftree_core::{outcome_from_length, IndexerError, IndexerResult, OwnedToken, ProbeOutcome, Project};

use crate::config::HTTP_TIMEOUT_SECS;

fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
}

/// Indexer reached over HTTP POST.
#[derive(Clone)]
pub struct HttpIndexer {
    client: reqwest::Client,
    url: String,
}

impl HttpIndexer {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(&self, request: &GraphQlRequest) -> IndexerResult<String> {
        log::debug!("POST {} ({})", self.url, request.operation_name);

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| IndexerError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| IndexerError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(IndexerError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

impl Indexer for HttpIndexer {
    async fn all_projects(&self) -> IndexerResult<Vec<Project>> {
        let body = self.post(&GraphQlRequest::all_projects()).await?;
        decode_projects(&body)
    }

    async fn projects_by_owner(&self, owner: &str) -> IndexerResult<Vec<OwnedToken>> {
        let body = self.post(&GraphQlRequest::projects_by_owner(owner)).await?;
        decode_owned_tokens(&body)
    }
}

/// Best-effort GET of an image URL. Never fails; the outcome says what happened.
///
/// Only the headers, or at most the first body chunk, are read.
pub async fn probe_image(url: &str) -> ProbeOutcome {
    let mut response = match build_client().get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            log::warn!("Image probe failed for {}: {}", url, e);
            return ProbeOutcome::Failed;
        }
    };

    if !response.status().is_success() {
        log::warn!("Image probe for {} returned {}", url, response.status());
        return ProbeOutcome::Failed;
    }

    if let Some(outcome) = outcome_from_length(response.content_length()) {
        return outcome;
    }

    match response.chunk().await {
        Ok(Some(chunk)) if !chunk.is_empty() => ProbeOutcome::Found,
        Ok(_) => ProbeOutcome::Empty,
        Err(e) => {
            log::warn!("Image probe body failed for {}: {}", url, e);
            ProbeOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve one canned HTTP response on a local port and return its URL.
    fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 2048];
                let _ = stream.read(&mut request);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}/art.png", addr)
    }

    #[tokio::test]
    async fn test_probe_empty_length_is_empty() {
        let url = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        assert_eq!(probe_image(&url).await, ProbeOutcome::Empty);
    }

    #[tokio::test]
    async fn test_probe_known_length_is_found() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: 4\r\nConnection: close\r\n\r\nPNG!",
        );
        assert_eq!(probe_image(&url).await, ProbeOutcome::Found);
    }

    #[tokio::test]
    async fn test_probe_chunked_body_reads_first_chunk() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n4\r\nPNG!\r\n0\r\n\r\n",
        );
        assert_eq!(probe_image(&url).await, ProbeOutcome::Found);
    }

    #[tokio::test]
    async fn test_probe_error_status_fails() {
        let url = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        assert_eq!(probe_image(&url).await, ProbeOutcome::Failed);
    }

    #[tokio::test]
    async fn test_probe_invalid_url_fails_quietly() {
        assert_eq!(probe_image("not a url").await, ProbeOutcome::Failed);
    }

    #[tokio::test]
    async fn test_unreachable_indexer_is_http_error() {
        let indexer = HttpIndexer::new("http://127.0.0.1:9/graphql");
        let err = indexer.all_projects().await.unwrap_err();
        assert!(matches!(err, IndexerError::Http(_)));
    }
}
