//! Beam Store - SQLite persistence bootstrap
//!
//! Provides:
//! - Store configuration and connection setup
//! - Embedded SQL migrations with a `migrations` ledger
//! - A runner applying each migration exactly once, atomically, in order
//! - `Database`, the startup entry point handed to the rest of the app

pub mod config;
pub mod database;
pub mod db;
pub mod errors;
pub mod migrations;

// Re-export key types
pub use config::{DatabaseUrl, StoreConfig};
pub use database::Database;
pub use errors::{Result, StoreError, StoreErrorKind};
