//! Per-user result cache shared across prompt renders.
//!
//! Providers use the cache to remember small facts between invocations (the
//! git provider stores the time of its last background fetch). The cache is a
//! single JSON object persisted in the temp directory, one file per OS user.
//!
//! # Public API
//! - [`ResultCache`]: thread-safe key/value store with load-once, save-once semantics
//!
//! # Cache Strategy
//! - **Load once**: the file is read when the cache is opened; a missing file is an empty cache
//! - **Save once**: [`ResultCache::save`] writes only if at least one `set` happened
//! - **Concurrency**: reads share an `RwLock`, writes are serialized
//! - **No cross-process locking**: concurrent renders may race on save, last writer wins

use crate::core::error::{PromptError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default)]
struct CacheData {
    entries: Map<String, Value>,
    modified: bool,
}

#[derive(Debug)]
pub struct ResultCache {
    file: Option<PathBuf>,
    data: RwLock<CacheData>,
}

impl ResultCache {
    /// Open the cache file of `user`, falling back to an unsaved in-memory
    /// cache when the user is unknown
    pub fn for_user(user: Option<&str>) -> Self {
        let Some(user) = user else {
            log::warn!("Unable to determine current user, cache will not be persisted");
            return Self::in_memory();
        };

        let path = Self::default_path(user);
        match Self::open(&path) {
            Ok(cache) => cache,
            Err(e) => {
                log::warn!("Unable to load cache, starting empty: {e}");
                Self {
                    file: Some(path),
                    data: RwLock::new(CacheData::default()),
                }
            }
        }
    }

    pub fn default_path(user: &str) -> PathBuf {
        std::env::temp_dir().join(format!("shprompt-{user}.json"))
    }

    /// Open a cache backed by `path`. A missing file yields an empty cache.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        log::debug!("Loading cache file: {}", path.display());

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| PromptError::cache_read_failed(&path, e))?;
            serde_json::from_str::<Map<String, Value>>(&content)
                .map_err(|e| PromptError::cache_parse_failed(&path, e))?
        } else {
            log::debug!("Cache file does not exist yet: {}", path.display());
            Map::new()
        };

        Ok(Self {
            file: Some(path),
            data: RwLock::new(CacheData {
                entries,
                modified: false,
            }),
        })
    }

    /// Cache that lives only for this process
    pub fn in_memory() -> Self {
        Self {
            file: None,
            data: RwLock::new(CacheData::default()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        data.entries.get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        data.entries.insert(key.into(), value.into());
        data.modified = true;
    }

    pub fn is_modified(&self) -> bool {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .modified
    }

    /// Persist the cache if it was modified since it was opened or last saved
    pub fn save(&self) -> Result<()> {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        if !data.modified {
            return Ok(());
        }
        let Some(path) = &self.file else {
            log::debug!("In-memory cache, nothing to save");
            return Ok(());
        };

        let json = serde_json::to_string(&data.entries).map_err(|e| {
            log::error!("Failed to serialize cache data: {e}");
            PromptError::cache_serialization_failed(e)
        })?;

        fs::write(path, json).map_err(|e| {
            log::error!("Failed to write cache file '{}': {}", path.display(), e);
            PromptError::cache_write_failed(path, e)
        })?;

        data.modified = false;
        log::debug!("Saved {} cache entries", data.entries.len());
        Ok(())
    }
}
