//! Logging and tracing initialization for Portico.
//!
//! The library itself only emits `tracing` events (for example a warning
//! when a stored document fails to parse and degrades to an empty
//! collection). Call one of these initializers once at application
//! startup to actually see them.
//!
//! The log level is controlled via the `RUST_LOG` environment variable:
//!
//! ```bash
//! # Show everything, including per-write debug traces
//! RUST_LOG=debug cargo run
//!
//! # Show only warnings and errors (production)
//! RUST_LOG=warn cargo run
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with sensible defaults.
///
/// The log level is controlled by the `RUST_LOG` environment variable.
/// If not set, defaults to `info`.
///
/// # Panics
///
/// This function will panic if called multiple times. Only call it once
/// at application startup.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize logging with a specific log level.
///
/// Useful when you want to set the level programmatically instead of
/// through `RUST_LOG`.
///
/// # Panics
///
/// This function will panic if called multiple times. Only call it once
/// at application startup.
pub fn init_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize JSON-formatted logging (recommended for production).
///
/// Outputs logs in JSON format for log aggregation systems like ELK,
/// Datadog, or CloudWatch.
///
/// # Panics
///
/// This function will panic if called multiple times. Only call it once
/// at application startup.
pub fn init_logging_json() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}
