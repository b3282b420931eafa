//! Migration framework
//!
//! Provides:
//! - Migration sources (embedded bundle, directory, in-memory)
//! - Quote-aware statement splitting
//! - The `migrations` ledger
//! - A runner applying each file exactly once, atomically, in name order

mod ledger;
mod runner;
mod source;
mod split;
mod status;
mod types;

pub use ledger::{Ledger, LEDGER_TABLE};
pub use runner::apply_all;
pub use source::{DirMigrations, EmbeddedMigrations, MigrationSource, StaticMigrations};
pub use split::split_statements;
pub use status::status;
pub use types::{MigrationFile, MigrationRecord, MigrationReport, MigrationStatus, StatusReport};
