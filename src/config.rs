use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory holding the persisted JSON documents (default: ./data)
    pub data_dir: String,

    /// Application-wide salt appended to secrets before digesting.
    ///
    /// One fixed salt for the whole store. Changing it invalidates
    /// every stored credential.
    pub digest_salt: String,

    /// Visit log retention: most-recent entries kept (default: 1000)
    pub visit_log_cap: usize,

    /// Daily stats retention window in days (default: 90)
    pub daily_retention_days: i64,

    /// Custom event log retention: most-recent entries kept (default: 500)
    pub event_log_cap: usize,

    /// Environment: development, production, test
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables (with .env support).
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        // Load .env file if present (ignore errors if missing)
        let _ = dotenvy::dotenv();

        Ok(Config {
            data_dir: std::env::var("PORTICO_DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            digest_salt: std::env::var("PORTICO_DIGEST_SALT")
                .unwrap_or_else(|_| "portico-dev-salt-change-me".to_string()),
            visit_log_cap: std::env::var("PORTICO_VISIT_LOG_CAP")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap_or(1000),
            daily_retention_days: std::env::var("PORTICO_DAILY_RETENTION_DAYS")
                .unwrap_or_else(|_| "90".to_string())
                .parse()
                .unwrap_or(90),
            event_log_cap: std::env::var("PORTICO_EVENT_LOG_CAP")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .unwrap_or(500),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }

    /// Check if running in development mode.
    pub fn is_dev(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    /// Built-in defaults, independent of the process environment.
    fn default() -> Self {
        Config {
            data_dir: "./data".to_string(),
            digest_salt: "portico-dev-salt-change-me".to_string(),
            visit_log_cap: 1000,
            daily_retention_days: 90,
            event_log_cap: 500,
            environment: "development".to_string(),
        }
    }
}
