// Persistence adapter for the draft map.
//
// The session never touches storage directly. It is handed a
// `DraftPersistence` at construction; the usual one is `BlobPersistence`,
// which keeps the map as a JSON blob under a fixed key in any `BlobStore`
// (SQLite via `crate::db::Database`, or `MemoryStore`).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::draft::DraftMap;

/// Default key the draft map is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "draftboard.draft_map";

/// A string-keyed store of opaque string blobs.
pub trait BlobStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: BlobStore + ?Sized> BlobStore for Arc<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}

/// In-process blob store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with `value` under `key`.
    pub fn with_blob(key: &str, value: &str) -> Self {
        MemoryStore {
            blobs: Mutex::new(HashMap::from([(key.to_string(), value.to_string())])),
        }
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store mutex poisoned"))?;
        Ok(blobs.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store mutex poisoned"))?;
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load/save contract between a draft session and durable storage.
///
/// Both operations are best-effort: `load` yields an empty map when nothing
/// usable is stored, and `save` swallows failures. A session keeps working
/// from memory when storage is unavailable.
pub trait DraftPersistence: Send {
    fn load(&self) -> DraftMap;
    fn save(&self, map: &DraftMap);
}

/// Stores the draft map as a JSON blob under one key of a [`BlobStore`].
pub struct BlobPersistence<S> {
    store: S,
    key: String,
}

impl<S: BlobStore> BlobPersistence<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        BlobPersistence {
            store,
            key: key.into(),
        }
    }

    /// Use [`DEFAULT_STORAGE_KEY`].
    pub fn with_default_key(store: S) -> Self {
        Self::new(store, DEFAULT_STORAGE_KEY)
    }

    fn try_load(&self) -> Result<Option<DraftMap>> {
        let Some(blob) = self.store.read(&self.key)? else {
            return Ok(None);
        };
        let map = DraftMap::from_json(&blob)
            .with_context(|| format!("stored draft map under '{}' is not valid", self.key))?;
        Ok(Some(map))
    }

    fn try_save(&self, map: &DraftMap) -> Result<()> {
        let blob = map.to_json().context("failed to serialize draft map")?;
        self.store.write(&self.key, &blob)
    }
}

impl<S: BlobStore> DraftPersistence for BlobPersistence<S> {
    fn load(&self) -> DraftMap {
        match self.try_load() {
            Ok(Some(map)) => {
                debug!("restored {} draft entries from '{}'", map.len(), self.key);
                map
            }
            Ok(None) => DraftMap::new(),
            Err(e) => {
                warn!("ignoring persisted draft map: {:#}", e);
                DraftMap::new()
            }
        }
    }

    fn save(&self, map: &DraftMap) {
        if let Err(e) = self.try_save(map) {
            warn!("failed to persist draft map: {:#}", e);
        }
    }
}

/// Persistence that remembers nothing. For boards that should start clean
/// every time.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPersistence;

impl DraftPersistence for NoPersistence {
    fn load(&self) -> DraftMap {
        DraftMap::new()
    }

    fn save(&self, _map: &DraftMap) {}
}

#[cfg(test)]
pub(crate) struct FailingStore;

#[cfg(test)]
impl BlobStore for FailingStore {
    fn read(&self, _key: &str) -> Result<Option<String>> {
        anyhow::bail!("disk on fire")
    }

    fn write(&self, _key: &str, _value: &str) -> Result<()> {
        anyhow::bail!("disk on fire")
    }
}
