//! Portico core: the storage, auth, and visit-analytics subsystem of the
//! Portico start page.
//!
//! Four pieces, leaves first:
//!
//! - [`storage`] — flat key/value namespace of JSON documents, with
//!   in-memory and local-filesystem backends.
//! - [`auth`] — salted one-way credential digest.
//! - [`store`] — Users, Websites, and the login audit trail; seeded once,
//!   queried and mutated by the UI layer.
//! - [`analytics`] — the per-session visit tracker and the read-only
//!   stats rollups it feeds.
//!
//! Everything is synchronous: the core runs as a single logical thread
//! driven by discrete external triggers.

pub mod analytics;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod prelude;
pub mod storage;
pub mod store;
pub mod testing;

pub use config::Config;
pub use error::PorticoError;
pub use logging::{init_logging, init_logging_json, init_logging_with_level};
pub use store::Store;
