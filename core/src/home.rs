//! Home page data: owned collections merged with the pending cache.
//!
//! ```text
//! all_projects() ──┐
//!                  ├─▶ ProjectIndex ─┐
//! projects_by_owner(owner) ──────────┼─▶ merge_owned ─▶ rows
//! AttestationCache::pending() ───────┘
//! ```

use crate::cache::{AttestationCache, KeyValueStore};
use crate::error::IndexerResult;
use crate::indexer::Indexer;
use crate::models::{address_key, Collection, OwnedToken, ProjectIndex};

/// Everything the home page renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeData {
    /// Full project list, used by rows to resolve their vault
    pub projects: ProjectIndex,
    /// Table rows
    pub collections: Vec<Collection>,
}

impl HomeData {
    /// Vault address for a row.
    pub fn vault_for(&self, collection: &Collection) -> Option<&str> {
        self.projects.vault_address(&collection.edition_address)
    }

    /// Rows of one edition.
    pub fn tokens_of(&self, edition_address: &str) -> Vec<&Collection> {
        let key = address_key(edition_address);
        self.collections.iter().filter(|c| c.key() == key).collect()
    }
}

/// Attach artwork to owned tokens and append pending collections.
///
/// An owned token whose edition is missing from the index keeps no image;
/// a pending collection already present (same edition and token) is skipped.
pub fn merge_owned(
    index: &ProjectIndex,
    owned: Vec<OwnedToken>,
    pending: Vec<Collection>,
) -> Vec<Collection> {
    let mut rows: Vec<Collection> = owned
        .into_iter()
        .map(|token| {
            if index.get(&token.edition_address).is_none() {
                log::warn!("No indexed project for owned edition {}", token.edition_address);
            }
            let image = index.image_uri(&token.edition_address).map(str::to_string);
            Collection::from_owned(token, image)
        })
        .collect();

    for collection in pending {
        let key = collection.key();
        let listed = rows
            .iter()
            .any(|r| r.key() == key && r.token_id == collection.token_id);
        if !listed {
            rows.push(collection);
        }
    }

    rows
}

/// Fetch both result sets concurrently and build the home page rows.
///
/// An unreadable pending cache is logged and treated as empty.
pub async fn load_home<I, S>(
    indexer: &I,
    cache: &AttestationCache<S>,
    owner: &str,
) -> IndexerResult<HomeData>
where
    I: Indexer,
    S: KeyValueStore,
{
    let (projects, owned) =
        futures::try_join!(indexer.all_projects(), indexer.projects_by_owner(owner))?;

    let pending = cache.pending().unwrap_or_else(|e| {
        log::warn!("Ignoring pending cache: {}", e);
        Vec::new()
    });

    let projects = ProjectIndex::new(projects);
    let collections = merge_owned(&projects, owned, pending);

    log::info!(
        "Loaded {} projects, {} rows for {}",
        projects.len(),
        collections.len(),
        owner
    );

    Ok(HomeData {
        projects,
        collections,
    })
}
