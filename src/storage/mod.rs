use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{AppError, AppResult};

pub mod activity;
pub mod favorites;
pub mod reviews;

pub use activity::{ActivityLog, MAX_ACTIVITY_ITEMS};
pub use favorites::{FavoriteSort, FavoritesStore};
pub use reviews::ReviewStore;

/// Keys for the persisted collections. The rendered names are part of the
/// stored data format; renaming one orphans that collection on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Favorites,
    Reviews,
    Activity,
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::Favorites => write!(f, "booktrack-favorites"),
            StorageKey::Reviews => write!(f, "booktrack-reviews"),
            StorageKey::Activity => write!(f, "booktrack-user-activity"),
        }
    }
}

/// Raw keyed string storage underneath the repositories. Implementations
/// only move payloads; (de)serialization and fallback policy live in the
/// repositories above.
pub trait StorageBackend: Send + Sync {
    /// Returns the stored payload for `key`, or `None` if nothing has been
    /// written yet.
    fn read(&self, key: StorageKey) -> AppResult<Option<String>>;

    /// Overwrites the payload for `key`.
    fn write(&self, key: StorageKey, payload: &str) -> AppResult<()>;
}

/// Backend that keeps each collection in a JSON file under a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// The directory is created on first write, not here, so constructing a
    /// backend never fails.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for JsonFileBackend {
    fn read(&self, key: StorageKey) -> AppResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn write(&self, key: StorageKey, payload: &str) -> AppResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::Storage(format!(
                "failed to create data directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;
        let path = self.path_for(key);
        fs::write(&path, payload).map_err(|e| {
            AppError::Storage(format!("failed to write {}: {}", path.display(), e))
        })
    }
}

/// In-memory backend. Nothing survives the process; used in tests and
/// anywhere an ephemeral library is acceptable.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: StorageKey) -> AppResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Storage("storage lock poisoned".to_string()))?;
        Ok(entries.get(&key).cloned())
    }

    fn write(&self, key: StorageKey, payload: &str) -> AppResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Storage("storage lock poisoned".to_string()))?;
        entries.insert(key, payload.to_string());
        Ok(())
    }
}

/// Loads a collection, treating every failure as an empty collection. A
/// corrupt payload is logged and discarded; the next persist overwrites it.
pub(crate) fn load_or_default<T>(backend: &dyn StorageBackend, key: StorageKey) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
{
    let raw = match backend.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Failed to read stored collection, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Stored collection is corrupt, resetting to empty");
            Vec::new()
        }
    }
}

/// Serializes and stores the full collection. Failures are logged and
/// swallowed; persistence problems must never break a user action.
pub(crate) fn persist<T>(backend: &dyn StorageBackend, key: StorageKey, items: &[T])
where
    T: serde::Serialize,
{
    let json = match serde_json::to_string(items) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(key = %key, error = %e, "Failed to serialize collection");
            return;
        }
    };

    if let Err(e) = backend.write(key, &json) {
        tracing::error!(key = %key, error = %e, "Failed to persist collection");
    }
}
