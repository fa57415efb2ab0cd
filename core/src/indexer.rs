//! GraphQL indexer interface.
//!
//! Wire types and query documents are shared; each target brings its own
//! HTTP client (`gloo-net` in the browser, `reqwest` in the CLI) and
//! implements [`Indexer`] on top of [`GraphQlRequest`] and the `decode_*`
//! helpers.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{IndexerError, IndexerResult};
use crate::models::{address_key, OwnedToken, Project};

/// Every project with its artwork and vault.
pub const ALL_PROJECTS_QUERY: &str = r#"query AllProjects {
  projects(first: 1000) {
    id
    imageURI
    vault {
      id
    }
  }
}"#;

/// Tokens held by one owner.
pub const PROJECTS_BY_OWNER_QUERY: &str = r#"query ProjectsByOwner($owner: Bytes!) {
  tokens(first: 1000, where: { owner: $owner }) {
    id
    tokenId
    editionAddress
  }
}"#;

/// Read access to the indexer.
#[allow(async_fn_in_trait)]
pub trait Indexer {
    /// Every known project.
    async fn all_projects(&self) -> IndexerResult<Vec<Project>>;

    /// Tokens held by `owner`.
    async fn projects_by_owner(&self, owner: &str) -> IndexerResult<Vec<OwnedToken>>;
}

// =============================================================================
// Wire Types
// =============================================================================

/// GraphQL POST body.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub query: &'static str,
    pub variables: Value,
    pub operation_name: &'static str,
}

impl GraphQlRequest {
    pub fn all_projects() -> Self {
        Self {
            query: ALL_PROJECTS_QUERY,
            variables: json!({}),
            operation_name: "AllProjects",
        }
    }

    /// Owner ids are stored lowercase by the indexer.
    pub fn projects_by_owner(owner: &str) -> Self {
        Self {
            query: PROJECTS_BY_OWNER_QUERY,
            variables: json!({ "owner": address_key(owner) }),
            operation_name: "ProjectsByOwner",
        }
    }
}

/// GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// One GraphQL error.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Errors take precedence over partial data.
    pub fn into_result(self) -> IndexerResult<T> {
        if !self.errors.is_empty() {
            return Err(IndexerError::GraphQl(
                self.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        self.data.ok_or(IndexerError::MissingData)
    }
}

#[derive(Debug, Deserialize)]
struct ProjectsData {
    projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
struct TokensData {
    tokens: Vec<OwnedToken>,
}

fn decode<T: DeserializeOwned>(body: &str) -> IndexerResult<T> {
    serde_json::from_str::<GraphQlResponse<T>>(body)?.into_result()
}

/// Decode an `AllProjects` response body.
pub fn decode_projects(body: &str) -> IndexerResult<Vec<Project>> {
    decode::<ProjectsData>(body).map(|d| d.projects)
}

/// Decode a `ProjectsByOwner` response body.
pub fn decode_owned_tokens(body: &str) -> IndexerResult<Vec<OwnedToken>> {
    decode::<TokensData>(body).map(|d| d.tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = GraphQlRequest::projects_by_owner("0xABCdef");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["variables"]["owner"], "0xabcdef");
        assert_eq!(value["operationName"], "ProjectsByOwner");
        assert!(value["query"].as_str().unwrap().contains("editionAddress"));
    }

    #[test]
    fn test_decode_projects() {
        let body = r#"{
            "data": {
                "projects": [
                    { "id": "0xaaa", "imageURI": "ipfs://Qm1", "vault": { "id": "0xv1" } },
                    { "id": "0xbbb", "imageURI": null, "vault": null }
                ]
            }
        }"#;
        let projects = decode_projects(body).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].vault.as_ref().unwrap().id, "0xv1");
        assert!(projects[1].image_uri.is_none());
    }

    #[test]
    fn test_decode_owned_tokens() {
        let body = r#"{
            "data": {
                "tokens": [
                    { "id": "0xaaa-1", "tokenId": "1", "editionAddress": "0xaaa" }
                ]
            }
        }"#;
        let tokens = decode_owned_tokens(body).unwrap();
        assert_eq!(tokens[0].edition_address, "0xaaa");
        assert_eq!(tokens[0].token_id, "1");
    }

    #[test]
    fn test_graphql_errors_win() {
        let body = r#"{ "data": { "tokens": [] }, "errors": [{ "message": "indexing error" }] }"#;
        let err = decode_owned_tokens(body).unwrap_err();
        assert!(matches!(err, IndexerError::GraphQl(ref m) if m == &vec!["indexing error".to_string()]));
    }

    #[test]
    fn test_missing_data() {
        let err = decode_projects(r#"{ "data": null }"#).unwrap_err();
        assert!(matches!(err, IndexerError::MissingData));
    }

    #[test]
    fn test_malformed_body() {
        let err = decode_projects("<html>502</html>").unwrap_err();
        assert!(matches!(err, IndexerError::Decode(_)));
    }
}
