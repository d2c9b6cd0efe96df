//! Portico prelude — import everything you need with one line.
//!
//! ```rust,ignore
//! use portico_core::prelude::*;
//! ```

// ── Core types ─────────────────────────────────────────────────
pub use crate::Config;
pub use crate::PorticoError;
pub use crate::Store;

// ── Storage ────────────────────────────────────────────────────
pub use crate::storage::{LocalStorage, MemoryStorage, StorageBackend};

// ── Analytics ──────────────────────────────────────────────────
pub use crate::analytics::{AnalyticsData, PageView, SessionTracker, snapshot};

// ── Models ─────────────────────────────────────────────────────
pub use crate::models::{Role, User, UserView, Website};

// ── Serde (most persisted types need these) ────────────────────
pub use serde::{Deserialize, Serialize};
