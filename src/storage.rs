//! Key/value JSON-document storage.
//!
//! All persisted state lives in a flat key namespace; each key holds one
//! independently-serialized JSON document (usually an array). A missing
//! key is an empty collection, never an error, and a document that fails
//! to parse degrades to an empty collection with a warning — reads never
//! surface a parse fault to callers. Writes do fail loudly: a storage
//! medium that rejects a write (quota, permissions) produces
//! [`PorticoError::Storage`].

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::error::PorticoError;

/// Well-known document keys.
pub mod keys {
    /// All [`crate::models::User`] records.
    pub const USERS: &str = "users";
    /// All [`crate::models::Website`] records.
    pub const WEBSITES: &str = "websites";
    /// Append-only login audit trail (uncapped).
    pub const LOGIN_SESSIONS: &str = "loginSessions";
    /// The visit log, capped to the most recent entries.
    pub const VISIT_LOG: &str = "analytics_sessions";
    /// Per-day visitor/page-view counters, capped by retention window.
    pub const DAILY_STATS: &str = "analytics_daily_stats";
    /// Custom event log, capped to the most recent entries.
    pub const EVENTS: &str = "analytics_events";
    /// Cached per-browser-session identifier.
    pub const SESSION_ID: &str = "analytics_session_id";
    /// Calendar-day marker backing the visit-uniqueness rule.
    pub const LAST_VISIT: &str = "analytics_last_visit";
}

/// Storage backend trait for the flat key/value document namespace.
///
/// Every operation is synchronous: the core runs as a single logical
/// thread driven by discrete triggers, and each write is a whole-document
/// replace for its key.
pub trait StorageBackend: Send + Sync {
    /// Read the raw document stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, PorticoError>;

    /// Replace the document stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), PorticoError>;

    /// Remove the document stored under `key`, if present.
    fn remove(&self, key: &str) -> Result<(), PorticoError>;
}

/// In-memory storage backend.
///
/// The medium of choice for tests and demos; contents vanish with the
/// process. The mutex only guards the map itself; there is no
/// read-modify-write transaction across calls, matching the single-user
/// usage model.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PorticoError> {
        let entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PorticoError> {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PorticoError> {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.remove(key);
        Ok(())
    }
}

/// Local filesystem storage backend.
///
/// Each key maps to one `<key>.json` file under the data directory.
///
/// ```rust,ignore
/// let storage = LocalStorage::new("./data");
/// storage.write("users", "[]")?;
/// ```
#[derive(Clone)]
pub struct LocalStorage {
    pub data_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new local storage backend rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        LocalStorage {
            data_dir: data_dir.into(),
        }
    }

    /// Ensure the data directory exists.
    pub fn ensure_dir(&self) -> Result<(), PorticoError> {
        std::fs::create_dir_all(&self.data_dir)
            .map_err(|e| PorticoError::Storage(format!("Failed to create data dir: {}", e)))
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PorticoError> {
        match std::fs::read_to_string(self.document_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PorticoError::Storage(format!(
                "Failed to read '{}': {}",
                key, e
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PorticoError> {
        self.ensure_dir()?;
        std::fs::write(self.document_path(key), value)
            .map_err(|e| PorticoError::Storage(format!("Failed to write '{}': {}", key, e)))
    }

    fn remove(&self, key: &str) -> Result<(), PorticoError> {
        match std::fs::remove_file(self.document_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PorticoError::Storage(format!(
                "Failed to remove '{}': {}",
                key, e
            ))),
        }
    }
}

/// Load the collection stored under `key`.
///
/// Graceful-degradation contract: a missing key, an unreadable medium,
/// or a document that fails to parse all yield an empty collection. The
/// two failure cases are logged; none of them propagate.
pub fn load_collection<T: DeserializeOwned>(storage: &dyn StorageBackend, key: &str) -> Vec<T> {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "storage read failed, treating as empty collection");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            warn!(key, error = %e, "malformed stored document, treating as empty collection");
            Vec::new()
        }
    }
}

/// Serialize `items` and replace the collection stored under `key`.
///
/// Unlike reads, write failures are reportable errors.
pub fn store_collection<T: Serialize>(
    storage: &dyn StorageBackend,
    key: &str,
    items: &[T],
) -> Result<(), PorticoError> {
    let raw = serde_json::to_string(items)?;
    storage.write(key, &raw)
}
