//! Browser key-value store for the attestation cache.

use nftree_core::{KeyValueStore, MemoryStore, StoreError, StoreResult};
use web_sys::Storage;

/// `localStorage` when the browser allows it, memory otherwise.
///
/// Private browsing modes can deny `localStorage`; the page still works,
/// the cache just does not survive a reload.
#[derive(Clone, Debug)]
pub enum BrowserStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    /// Open `localStorage`, falling back to memory.
    pub fn open() -> Self {
        match local_storage() {
            Ok(storage) => BrowserStore::Local(storage),
            Err(e) => {
                log::warn!("⚠️  {} - attestations cached in memory only", e);
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, BrowserStore::Local(_))
    }
}

fn local_storage() -> StoreResult<Storage> {
    gloo_utils::window()
        .local_storage()
        .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
        .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))
}

fn backend_error(e: wasm_bindgen::JsValue) -> StoreError {
    StoreError::Backend(format!("{:?}", e))
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match self {
            BrowserStore::Local(storage) => storage.get_item(key).map_err(backend_error),
            BrowserStore::Memory(memory) => memory.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        match self {
            BrowserStore::Local(storage) => storage.set_item(key, value).map_err(backend_error),
            BrowserStore::Memory(memory) => memory.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        match self {
            BrowserStore::Local(storage) => storage.remove_item(key).map_err(backend_error),
            BrowserStore::Memory(memory) => memory.remove(key),
        }
    }
}
