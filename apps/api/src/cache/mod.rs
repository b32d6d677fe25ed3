//! Flat-file JSON caches for upstream responses and generated summaries.
//!
//! Time and storage are injected (`Clock`, `CacheStorage`) so the serving
//! layer can be driven deterministically in tests.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, warn};

pub mod cooldown;

pub const SCOREBOARD_KEY: &str = "scoreboard";

pub fn boxscore_key(game_id: &str) -> String {
    format!("boxscores/{game_id}")
}

pub fn summary_key(game_id: &str) -> String {
    format!("summaries/{game_id}")
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("cache encode error for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cache task for '{key}' did not complete: {source}")]
    Task {
        key: String,
        #[source]
        source: JoinError,
    },
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Raw byte storage addressed by slash-separated keys.
///
/// Implementations may block; `CacheStore` calls them on the blocking pool.
pub trait CacheStorage: Send + Sync {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>>;
    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Stores each key as `<root>/<key>.json`.
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl CacheStorage for FsStorage {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match std::fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Writes to a temp file in the target directory, then renames over the
    /// destination so readers never observe a partial file.
    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        let path = self.path_for(key);
        let dir = path.parent().unwrap_or(Path::new("."));
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-process storage for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStorage {
    entries: std::sync::Mutex<std::collections::HashMap<String, Vec<u8>>>,
}

#[cfg(test)]
impl CacheStorage for MemoryStorage {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory storage poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory storage poisoned"))?;
        entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// On-disk envelope around every cached value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry<T> {
    pub stored_at: DateTime<Utc>,
    pub data: T,
}

/// Typed JSON cache over a `CacheStorage`. Cheap to clone.
#[derive(Clone)]
pub struct CacheStore {
    storage: Arc<dyn CacheStorage>,
    clock: Arc<dyn Clock>,
    write_lock: Arc<tokio::sync::Mutex<()>>,
}

impl CacheStore {
    pub fn new(storage: Arc<dyn CacheStorage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            write_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Returns the cached entry, or `None` on a miss.
    /// An entry that no longer decodes is logged and treated as a miss.
    pub async fn get<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<CacheEntry<T>>, CacheError> {
        let storage = Arc::clone(&self.storage);
        let owned_key = key.to_string();
        let bytes = tokio::task::spawn_blocking(move || storage.read(&owned_key))
            .await
            .map_err(|source| CacheError::Task {
                key: key.to_string(),
                source,
            })?
            .map_err(|source| CacheError::Io {
                key: key.to_string(),
                source,
            })?;

        let Some(bytes) = bytes else {
            debug!("cache miss: {key}");
            return Ok(None);
        };

        match serde_json::from_slice::<CacheEntry<T>>(&bytes) {
            Ok(entry) => {
                debug!("cache hit: {key} (stored {})", entry.stored_at);
                Ok(Some(entry))
            }
            Err(e) => {
                warn!("Discarding undecodable cache entry '{key}': {e}");
                Ok(None)
            }
        }
    }

    /// Stores `data` under `key`, stamped with the current time.
    pub async fn put<T: Serialize>(
        &self,
        key: &str,
        data: &T,
    ) -> Result<DateTime<Utc>, CacheError> {
        let stored_at = self.clock.now();
        let bytes = serde_json::to_vec_pretty(&CacheEntry { stored_at, data }).map_err(
            |source| CacheError::Encode {
                key: key.to_string(),
                source,
            },
        )?;

        let _guard = self.write_lock.lock().await;
        let storage = Arc::clone(&self.storage);
        let owned_key = key.to_string();
        tokio::task::spawn_blocking(move || storage.write(&owned_key, &bytes))
            .await
            .map_err(|source| CacheError::Task {
                key: key.to_string(),
                source,
            })?
            .map_err(|source| CacheError::Io {
                key: key.to_string(),
                source,
            })?;

        debug!("cache write: {key}");
        Ok(stored_at)
    }
}
