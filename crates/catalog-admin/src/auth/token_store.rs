//! Bearer token persistence
//!
//! Two key/value backends stand in for a browser's local and session
//! storage: a JSON file that survives restarts and an in-memory map that
//! lives as long as the process.

use catalog_core::AuthToken;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// File name of the persistent store inside the storage directory
pub const STORAGE_FILE: &str = "storage.json";

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        /// Backing file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The backing file does not hold a JSON string map
    #[error("Corrupt storage file {path}: {source}")]
    Json {
        /// Backing file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// String key/value storage
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// Value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`; removing a missing key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Process-lifetime storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Storage backed by a JSON object file
///
/// The whole map is rewritten on every change. A missing file reads as empty.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Store backed by `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store at [`STORAGE_FILE`] inside `dir`
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STORAGE_FILE))
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_map(&self) -> StorageResult<BTreeMap<String, String>> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StorageError::Json {
                path: self.path.clone(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Map to update; unreadable JSON is replaced rather than kept forever
    ///
    /// The flag is set when the file was corrupt and must be rewritten.
    fn read_map_for_write(&self) -> StorageResult<(BTreeMap<String, String>, bool)> {
        match self.read_map() {
            Ok(map) => Ok((map, false)),
            Err(StorageError::Json { path, source }) => {
                warn!(path = %path.display(), error = %source, "Discarding corrupt storage file");
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let bytes = serde_json::to_vec_pretty(map).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, bytes).map_err(|e| self.io_error(e))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.lock.lock();
        let (mut map, _) = self.read_map_for_write()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let _guard = self.lock.lock();
        let (mut map, corrupt) = self.read_map_for_write()?;
        if map.remove(key).is_some() || corrupt {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// The bearer token under one fixed key in two stores
#[derive(Debug, Clone)]
pub struct TokenStore {
    key: String,
    persistent: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    /// Token store over the given backends
    pub fn new(
        key: impl Into<String>,
        persistent: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            key: key.into(),
            persistent,
            session,
        }
    }

    /// Token store with both backends in memory
    pub fn in_memory(key: impl Into<String>) -> Self {
        Self::new(key, Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    /// Key the token is stored under
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored token, persistent store first
    ///
    /// # Errors
    ///
    /// Returns an error if either backend cannot be read.
    pub fn get(&self) -> StorageResult<Option<AuthToken>> {
        let persistent = self.persistent.get(&self.key)?.filter(|t| !t.is_empty());
        let token = match persistent {
            Some(token) => Some(token),
            None => self.session.get(&self.key)?.filter(|t| !t.is_empty()),
        };
        Ok(token.map(AuthToken::new))
    }

    /// Whether any token is stored
    ///
    /// # Errors
    ///
    /// Returns an error if either backend cannot be read.
    pub fn has_token(&self) -> StorageResult<bool> {
        Ok(self.get()?.is_some())
    }

    /// Replace the stored token
    ///
    /// Both stores are cleared first, then the token goes to the persistent
    /// store when `remember` is set and to the session store otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if either backend cannot be written.
    pub fn set(&self, token: &AuthToken, remember: bool) -> StorageResult<()> {
        self.clear()?;
        let target = if remember {
            &self.persistent
        } else {
            &self.session
        };
        target.set(&self.key, token.as_str())?;
        debug!(remember, "Token stored");
        Ok(())
    }

    /// Remove the token from both stores
    ///
    /// # Errors
    ///
    /// Returns an error if either backend cannot be written.
    pub fn clear(&self) -> StorageResult<()> {
        self.persistent.remove(&self.key)?;
        self.session.remove(&self.key)
    }
}
