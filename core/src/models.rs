//! Domain models for NFTree collections.
//!
//! - [`Project`] - Indexer view of a collection contract and its vault
//! - [`OwnedToken`] - Indexer view of a token held by an account
//! - [`Collection`] - One row of the home page table
//! - [`ProjectIndex`] - Projects keyed by edition address

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Normalizes a hex address for comparisons.
///
/// The indexer returns lowercase ids while wallets and cached records may
/// carry checksummed addresses.
pub fn address_key(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

/// Accepts token ids serialized either as strings or as JSON numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, found {}",
            other
        ))),
    }
}

// =============================================================================
// Indexer Records
// =============================================================================

/// Vault contract that receives attestations for one collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vault {
    /// Vault contract address
    pub id: String,
}

/// A collection contract as listed by the indexer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    /// Edition address
    pub id: String,
    /// Collection artwork
    #[serde(rename = "imageURI", default)]
    pub image_uri: Option<String>,
    /// Vault receiving `vote` calls
    #[serde(default)]
    pub vault: Option<Vault>,
}

/// A token held by an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OwnedToken {
    /// Indexer entity id
    #[serde(default)]
    pub id: Option<String>,
    /// Edition (collection) address the token belongs to
    pub edition_address: String,
    /// Token id, decimal
    #[serde(deserialize_with = "string_or_number")]
    pub token_id: String,
}

// =============================================================================
// Home Page Rows
// =============================================================================

/// One collection row on the home page.
///
/// This is also the shape stored in the pending cache, hence the
/// `editionAddress` / `tokenId` / `imageURI` field names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Edition address (identifier)
    pub edition_address: String,
    /// Token id, decimal
    #[serde(deserialize_with = "string_or_number")]
    pub token_id: String,
    /// Artwork URI, if known
    #[serde(rename = "imageURI", default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

impl Collection {
    /// Build a row from an owned token and the image the index knows for it.
    pub fn from_owned(token: OwnedToken, image_uri: Option<String>) -> Self {
        Self {
            edition_address: token.edition_address,
            token_id: token.token_id,
            image_uri,
        }
    }

    /// Case-insensitive key of the edition address.
    pub fn key(&self) -> String {
        address_key(&self.edition_address)
    }

    /// Relative link to the details route.
    pub fn details_href(&self, attested: bool) -> String {
        format!(
            "collections/{}?isAttested={}",
            self.edition_address, attested
        )
    }
}

// =============================================================================
// Project Index
// =============================================================================

/// All indexer projects, searchable by edition address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectIndex {
    projects: Vec<Project>,
    by_address: HashMap<String, usize>,
}

impl ProjectIndex {
    /// Index a project list. When an id repeats, the first entry wins.
    pub fn new(projects: Vec<Project>) -> Self {
        let mut by_address = HashMap::with_capacity(projects.len());
        for (i, project) in projects.iter().enumerate() {
            by_address.entry(address_key(&project.id)).or_insert(i);
        }
        Self {
            projects,
            by_address,
        }
    }

    /// Find the project for an edition address.
    pub fn get(&self, edition_address: &str) -> Option<&Project> {
        self.by_address
            .get(&address_key(edition_address))
            .map(|&i| &self.projects[i])
    }

    /// Image URI of an edition, if the index has a non-empty one.
    pub fn image_uri(&self, edition_address: &str) -> Option<&str> {
        self.get(edition_address)
            .and_then(|p| p.image_uri.as_deref())
            .filter(|uri| !uri.trim().is_empty())
    }

    /// Vault address of an edition.
    pub fn vault_address(&self, edition_address: &str) -> Option<&str> {
        self.get(edition_address)
            .and_then(|p| p.vault.as_ref())
            .map(|v| v.id.as_str())
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project(id: &str, image: Option<&str>, vault: Option<&str>) -> Project {
        Project {
            id: id.to_string(),
            image_uri: image.map(str::to_string),
            vault: vault.map(|v| Vault { id: v.to_string() }),
        }
    }

    #[test]
    fn test_project_deserialization() {
        let value = json!({
            "id": "0xabc",
            "imageURI": "ipfs://Qm123",
            "vault": { "id": "0xdef" }
        });
        let project: Project = serde_json::from_value(value).unwrap();
        assert_eq!(project.image_uri.as_deref(), Some("ipfs://Qm123"));
        assert_eq!(project.vault.unwrap().id, "0xdef");
    }

    #[test]
    fn test_project_without_vault() {
        let project: Project = serde_json::from_value(json!({ "id": "0xabc" })).unwrap();
        assert!(project.vault.is_none());
        assert!(project.image_uri.is_none());
    }

    #[test]
    fn test_token_id_accepts_numbers() {
        let collection: Collection = serde_json::from_value(json!({
            "editionAddress": "0xabc",
            "tokenId": 42
        }))
        .unwrap();
        assert_eq!(collection.token_id, "42");
        assert!(collection.image_uri.is_none());
    }

    #[test]
    fn test_token_id_rejects_objects() {
        let result: Result<Collection, _> = serde_json::from_value(json!({
            "editionAddress": "0xabc",
            "tokenId": { "value": 1 }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_collection_serializes_cache_shape() {
        let collection = Collection {
            edition_address: "0xAbC".into(),
            token_id: "7".into(),
            image_uri: Some("https://img/7.png".into()),
        };
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["editionAddress"], "0xAbC");
        assert_eq!(value["tokenId"], "7");
        assert_eq!(value["imageURI"], "https://img/7.png");
    }

    #[test]
    fn test_index_lookup_is_case_insensitive() {
        let index = ProjectIndex::new(vec![project("0xabcdef", Some("img"), Some("0xvault"))]);
        assert_eq!(index.vault_address("0xABCDEF"), Some("0xvault"));
        assert_eq!(index.image_uri(" 0xAbCdEf "), Some("img"));
        assert!(index.get("0x123").is_none());
    }

    #[test]
    fn test_index_first_duplicate_wins() {
        let index = ProjectIndex::new(vec![
            project("0xabc", Some("first"), None),
            project("0xABC", Some("second"), None),
        ]);
        assert_eq!(index.image_uri("0xabc"), Some("first"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_blank_image_is_none() {
        let index = ProjectIndex::new(vec![project("0xabc", Some("  "), None)]);
        assert!(index.image_uri("0xabc").is_none());
    }

    #[test]
    fn test_details_href() {
        let collection = Collection {
            edition_address: "0xabc".into(),
            token_id: "1".into(),
            image_uri: None,
        };
        assert_eq!(collection.details_href(true), "collections/0xabc?isAttested=true");
    }
}
