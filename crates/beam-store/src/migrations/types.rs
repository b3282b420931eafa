//! Migration data types

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One pending unit of schema change, read from a migration source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// Filename, e.g. `0001_customers.sql`; the sort key
    pub name: String,
    /// Raw SQL, possibly several `;`-separated statements
    pub content: String,
}

impl MigrationFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A row of the `migrations` ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationRecord {
    pub id: String,
    pub name: String,
    pub applied_at: DateTime<Utc>,
}

/// What one `apply_all` call did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Names applied by this call, in application order
    pub applied: Vec<String>,
    /// Names already recorded, including those another runner recorded first
    pub skipped: Vec<String>,
}

impl MigrationReport {
    /// True when the call changed nothing
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Applied state of one bundled migration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub name: String,
    /// `None` while pending
    pub applied_at: Option<DateTime<Utc>>,
}

impl MigrationStatus {
    pub fn is_applied(&self) -> bool {
        self.applied_at.is_some()
    }
}

/// Bundle files against the ledger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Every bundled migration, in name order
    pub migrations: Vec<MigrationStatus>,
    /// Ledger rows with no matching file in the bundle
    pub unknown: Vec<MigrationRecord>,
}

impl StatusReport {
    pub fn pending(&self) -> impl Iterator<Item = &MigrationStatus> {
        self.migrations.iter().filter(|m| !m.is_applied())
    }

    pub fn is_up_to_date(&self) -> bool {
        self.pending().next().is_none()
    }
}
