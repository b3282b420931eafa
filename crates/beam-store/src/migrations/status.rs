//! Applied/pending status of the bundle against the ledger

use crate::errors::Result;
use crate::migrations::ledger::Ledger;
use crate::migrations::source::MigrationSource;
use crate::migrations::types::{MigrationStatus, StatusReport};
use rusqlite::Connection;
use std::collections::{HashMap, HashSet};

/// Report every migration from `source` as applied or pending
///
/// Ledger rows naming files absent from the source are returned in
/// `unknown` and logged; they are never removed.
///
/// # Errors
///
/// `Discovery` if the source cannot be read, `Query` if the ledger cannot.
pub fn status(conn: &Connection, source: &dyn MigrationSource) -> Result<StatusReport> {
    let files = source.files()?;
    let records = Ledger::new(conn).list()?;

    let applied: HashMap<&str, _> = records
        .iter()
        .map(|r| (r.name.as_str(), r.applied_at))
        .collect();
    let known: HashSet<&str> = files.iter().map(|f| f.name.as_str()).collect();

    let migrations = files
        .iter()
        .map(|f| MigrationStatus {
            name: f.name.clone(),
            applied_at: applied.get(f.name.as_str()).copied(),
        })
        .collect();

    let unknown: Vec<_> = records
        .iter()
        .filter(|r| !known.contains(r.name.as_str()))
        .cloned()
        .collect();
    for record in &unknown {
        tracing::warn!(
            migration = %record.name,
            "ledger records a migration missing from the bundle"
        );
    }

    Ok(StatusReport {
        migrations,
        unknown,
    })
}
