//! Test fixtures.
//!
//! ```rust,ignore
//! use portico_core::testing::TestCore;
//!
//! #[test]
//! fn test_login() {
//!     let core = TestCore::new();
//!     let user = core.store.authenticate("admin", "admin123", "test-agent").unwrap();
//!     assert_eq!(user.username, "admin");
//! }
//! ```

use std::sync::Arc;

use crate::analytics::SessionTracker;
use crate::config::Config;
use crate::storage::MemoryStorage;
use crate::store::Store;

/// A seeded core backed by in-memory storage.
pub struct TestCore {
    pub storage: Arc<MemoryStorage>,
    pub config: Config,
    pub store: Store,
}

impl TestCore {
    /// Create a freshly seeded core with test configuration.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a seeded core with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let store = Store::new(storage.clone(), &config).expect("Failed to seed test store");
        TestCore {
            storage,
            config,
            store,
        }
    }

    /// Build a session tracker over this core's storage.
    pub fn tracker(&self) -> SessionTracker {
        SessionTracker::new(self.storage.clone(), &self.config)
            .expect("Failed to build test tracker")
    }
}

impl Default for TestCore {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration used by the fixtures: in-memory-friendly defaults and a
/// fixed test salt.
pub fn test_config() -> Config {
    Config {
        data_dir: "/tmp/portico-test-data".to_string(),
        digest_salt: "test-salt".to_string(),
        visit_log_cap: 1000,
        daily_retention_days: 90,
        event_log_cap: 500,
        environment: "test".to_string(),
    }
}
