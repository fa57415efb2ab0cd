//! GraphQL indexer client over `fetch`.

use gloo_net::http::Request;
use nftree_core::indexer::{decode_owned_tokens, decode_projects, GraphQlRequest, Indexer};
use nftree_core::{IndexerError, IndexerResult, OwnedToken, Project};

/// Indexer reached with `gloo-net`.
#[derive(Clone, Debug)]
pub struct GraphQlIndexer {
    url: String,
}

impl GraphQlIndexer {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    async fn post(&self, request: &GraphQlRequest) -> IndexerResult<String> {
        let response = Request::post(&self.url)
            .json(request)
            .map_err(|e| IndexerError::Http(format!("Failed to build request: {}", e)))?
            .send()
            .await
            .map_err(|e| IndexerError::Http(e.to_string()))?;

        if !response.ok() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(IndexerError::Status {
                status: response.status(),
                body,
            });
        }

        response
            .text()
            .await
            .map_err(|e| IndexerError::Http(e.to_string()))
    }
}

impl Indexer for GraphQlIndexer {
    async fn all_projects(&self) -> IndexerResult<Vec<Project>> {
        let body = self.post(&GraphQlRequest::all_projects()).await?;
        decode_projects(&body)
    }

    async fn projects_by_owner(&self, owner: &str) -> IndexerResult<Vec<OwnedToken>> {
        let body = self.post(&GraphQlRequest::projects_by_owner(owner)).await?;
        decode_owned_tokens(&body)
    }
}
