//! Attestation cache - remembers attested and pending collections.
//!
//! The cache sits on top of a plain string [`KeyValueStore`]. The browser
//! implementation wraps `localStorage`, the CLI a JSON file, tests use
//! [`MemoryStore`]. Keys and value shapes are shared by all backends:
//!
//! | Key                         | Value                          |
//! |-----------------------------|--------------------------------|
//! | `isSuccess`                 | `"true"` after any attestation |
//! | `attestedCollectionsCache`  | JSON array of edition addresses|
//! | `collectionsToAttestCache`  | JSON array of [`Collection`]   |
//!
//! Every list mutation goes through [`KeyValueStore::update`], so an
//! append never drops a concurrent append.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::{StoreError, StoreResult};
use crate::models::{address_key, Collection};

/// Set to `"true"` after a successful attestation.
pub const SUCCESS_FLAG_KEY: &str = "isSuccess";

/// Edition addresses already attested.
pub const ATTESTED_KEY: &str = "attestedCollectionsCache";

/// Collections waiting to be attested.
pub const PENDING_KEY: &str = "collectionsToAttestCache";

// =============================================================================
// Key-Value Store
// =============================================================================

/// Minimal string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Read-modify-write a single key.
    ///
    /// The default reads then writes. Backends shared between threads
    /// override it to hold their lock across both steps.
    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> StoreResult<String>,
    ) -> StoreResult<()> {
        let current = self.get(key)?;
        let next = f(current)?;
        self.set(key, &next)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }

    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> StoreResult<String>,
    ) -> StoreResult<()> {
        (**self).update(key, f)
    }
}

/// In-memory store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries().remove(key);
        Ok(())
    }

    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> StoreResult<String>,
    ) -> StoreResult<()> {
        let mut entries = self.entries();
        let next = f(entries.get(key).cloned())?;
        entries.insert(key.to_string(), next);
        Ok(())
    }
}

// =============================================================================
// Attestation Cache
// =============================================================================

/// Typed access to the attestation keys of a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct AttestationCache<S> {
    store: S,
}

impl<S: KeyValueStore> AttestationCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Edition addresses already attested, in insertion order.
    pub fn attested(&self) -> StoreResult<Vec<String>> {
        Ok(read_json(&self.store, ATTESTED_KEY)?.unwrap_or_default())
    }

    /// Whether an edition address is in the attested list.
    pub fn is_attested(&self, edition_address: &str) -> StoreResult<bool> {
        let key = address_key(edition_address);
        Ok(self.attested()?.iter().any(|a| address_key(a) == key))
    }

    /// Append an edition address to the attested list and raise the
    /// success flag.
    ///
    /// Returns `false` when the address was already listed; the list never
    /// holds an address twice.
    pub fn record_attested(&self, edition_address: &str) -> StoreResult<bool> {
        let key = address_key(edition_address);
        let added = modify_list::<String, _>(&self.store, ATTESTED_KEY, |list| {
            if list.iter().any(|a| address_key(a) == key) {
                false
            } else {
                list.push(edition_address.to_string());
                true
            }
        })?;
        self.store.set(SUCCESS_FLAG_KEY, "true")?;

        if added {
            log::info!("Attested and cached {}", edition_address);
        }
        Ok(added)
    }

    /// Collections waiting to be attested.
    pub fn pending(&self) -> StoreResult<Vec<Collection>> {
        Ok(read_json(&self.store, PENDING_KEY)?.unwrap_or_default())
    }

    /// Queue a collection for attestation. Returns `false` if one with the
    /// same edition address and token id is already queued.
    pub fn queue_pending(&self, collection: Collection) -> StoreResult<bool> {
        let key = collection.key();
        modify_list::<Collection, _>(&self.store, PENDING_KEY, |list| {
            let exists = list
                .iter()
                .any(|c| c.key() == key && c.token_id == collection.token_id);
            if !exists {
                list.push(collection.clone());
            }
            !exists
        })
    }

    /// Whether any attestation succeeded on this device.
    pub fn last_success(&self) -> StoreResult<bool> {
        Ok(self.store.get(SUCCESS_FLAG_KEY)?.as_deref() == Some("true"))
    }

    /// Remove every attestation key.
    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(SUCCESS_FLAG_KEY)?;
        self.store.remove(ATTESTED_KEY)?;
        self.store.remove(PENDING_KEY)
    }
}

fn read_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> StoreResult<Option<T>> {
    match store.get(key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                key: key.to_string(),
                message: e.to_string(),
            }),
    }
}

/// Read-modify-write a JSON list. A corrupt value is replaced by a fresh list.
fn modify_list<T, F>(store: &impl KeyValueStore, key: &str, mut f: F) -> StoreResult<bool>
where
    T: DeserializeOwned + Serialize,
    F: FnMut(&mut Vec<T>) -> bool,
{
    let mut changed = false;
    store.update(key, &mut |current: Option<String>| {
        let mut list: Vec<T> = match current {
            None => Vec::new(),
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("Resetting corrupt cache entry '{}': {}", key, e);
                Vec::new()
            }),
        };
        changed = f(&mut list);
        serde_json::to_string(&list).map_err(|e| StoreError::Backend(e.to_string()))
    })?;
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(edition: &str, token: &str) -> Collection {
        Collection {
            edition_address: edition.into(),
            token_id: token.into(),
            image_uri: None,
        }
    }

    #[test]
    fn test_record_attested_once() {
        let cache = AttestationCache::new(MemoryStore::new());

        assert!(cache.record_attested("0xAbc").unwrap());
        assert!(!cache.record_attested("0xabc").unwrap());
        assert!(!cache.record_attested("0xABC").unwrap());

        assert_eq!(cache.attested().unwrap(), vec!["0xAbc".to_string()]);
        assert!(cache.is_attested("0xabc").unwrap());
        assert!(cache.last_success().unwrap());
    }

    #[test]
    fn test_record_keeps_order() {
        let cache = AttestationCache::new(MemoryStore::new());
        cache.record_attested("0x1").unwrap();
        cache.record_attested("0x2").unwrap();
        cache.record_attested("0x3").unwrap();
        assert_eq!(cache.attested().unwrap(), vec!["0x1", "0x2", "0x3"]);
    }

    #[test]
    fn test_stored_format_is_json_array() {
        let store = MemoryStore::new();
        let cache = AttestationCache::new(store.clone());
        cache.record_attested("0xabc").unwrap();

        assert_eq!(store.get(ATTESTED_KEY).unwrap().as_deref(), Some(r#"["0xabc"]"#));
        assert_eq!(store.get(SUCCESS_FLAG_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_empty_store() {
        let cache = AttestationCache::new(MemoryStore::new());
        assert!(cache.attested().unwrap().is_empty());
        assert!(cache.pending().unwrap().is_empty());
        assert!(!cache.last_success().unwrap());
    }

    #[test]
    fn test_corrupt_entry_reported_then_replaced() {
        let store = MemoryStore::new();
        store.set(ATTESTED_KEY, "not json").unwrap();
        let cache = AttestationCache::new(&store);

        assert!(matches!(cache.attested(), Err(StoreError::Corrupt { .. })));

        assert!(cache.record_attested("0xabc").unwrap());
        assert_eq!(cache.attested().unwrap(), vec!["0xabc"]);
    }

    #[test]
    fn test_pending_reads_foreign_shape() {
        let store = MemoryStore::new();
        store
            .set(
                PENDING_KEY,
                r#"[{"editionAddress":"0xdef","tokenId":3,"imageURI":"https://img"}]"#,
            )
            .unwrap();
        let cache = AttestationCache::new(store);

        let pending = cache.pending().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].token_id, "3");
        assert_eq!(pending[0].image_uri.as_deref(), Some("https://img"));
    }

    #[test]
    fn test_queue_pending_dedups() {
        let cache = AttestationCache::new(MemoryStore::new());
        assert!(cache.queue_pending(collection("0xabc", "1")).unwrap());
        assert!(!cache.queue_pending(collection("0xABC", "1")).unwrap());
        assert!(cache.queue_pending(collection("0xabc", "2")).unwrap());
        assert_eq!(cache.pending().unwrap().len(), 2);
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let first = AttestationCache::new(store.clone());
        let second = AttestationCache::new(store);

        first.record_attested("0x1").unwrap();
        second.record_attested("0x2").unwrap();

        assert_eq!(first.attested().unwrap(), vec!["0x1", "0x2"]);
    }

    #[test]
    fn test_concurrent_appends_are_not_lost() {
        let store = MemoryStore::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = AttestationCache::new(store.clone());
                std::thread::spawn(move || cache.record_attested(&format!("0x{}", i)).unwrap())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }

        let cache = AttestationCache::new(store);
        assert_eq!(cache.attested().unwrap().len(), 8);
    }

    #[test]
    fn test_clear() {
        let cache = AttestationCache::new(MemoryStore::new());
        cache.record_attested("0x1").unwrap();
        cache.queue_pending(collection("0x2", "1")).unwrap();
        cache.clear().unwrap();

        assert!(cache.attested().unwrap().is_empty());
        assert!(cache.pending().unwrap().is_empty());
        assert!(!cache.last_success().unwrap());
    }
}
