//! Migration runner
//!
//! Applies pending migrations in name order, one transaction per file,
//! recording each in the ledger inside that same transaction.

use crate::errors::{migration_failed, Result, StoreError};
use crate::migrations::ledger::Ledger;
use crate::migrations::source::MigrationSource;
use crate::migrations::split::split_statements;
use crate::migrations::types::{MigrationFile, MigrationRecord, MigrationReport};
use beam_core_types::schema::OP_APPLY_ALL;
use beam_core_types::RunId;
use beam_logging::{log_migration, log_op_end, log_op_error, log_op_start};
use rusqlite::{Connection, TransactionBehavior};
use std::time::Instant;

/// Apply every migration from `source` not yet in the ledger
///
/// Files run in ascending name order. Each file's statements and its ledger
/// row commit together or not at all. The first failure halts the run;
/// earlier files stay committed. A file another runner recorded first is
/// reported as skipped. The ledger table must already exist.
///
/// # Errors
///
/// `Discovery` if the source cannot be read, `Query` if the ledger lookup
/// fails, `MigrationFailed` naming the first file that could not be applied.
pub fn apply_all(conn: &mut Connection, source: &dyn MigrationSource) -> Result<MigrationReport> {
    let run_id = RunId::new();
    let started = Instant::now();
    log_op_start!(OP_APPLY_ALL, run_id = %run_id);

    let result = apply_pending(conn, source, &run_id);
    let duration_ms = started.elapsed().as_millis() as u64;

    match &result {
        Ok(report) => {
            log_op_end!(
                OP_APPLY_ALL,
                duration_ms = duration_ms,
                run_id = %run_id,
                applied = report.applied.len(),
                skipped = report.skipped.len()
            );
        }
        Err(e) => {
            log_op_error!(
                OP_APPLY_ALL,
                e,
                duration_ms = duration_ms,
                run_id = %run_id,
                migration = e.migration_name().unwrap_or_default(),
                error = %e
            );
        }
    }

    result
}

fn apply_pending(
    conn: &mut Connection,
    source: &dyn MigrationSource,
    run_id: &RunId,
) -> Result<MigrationReport> {
    let files = source.files()?;
    let mut report = MigrationReport::default();

    for file in &files {
        if Ledger::new(conn).find(&file.name)?.is_some() {
            log_migration!(debug, run_id, file.name, "migration already applied");
            report.skipped.push(file.name.clone());
            continue;
        }

        match apply_file(conn, file, run_id) {
            Ok(record) => report.applied.push(record.name),
            Err(StoreError::DuplicateMigration { name }) => {
                log_migration!(warn, run_id, name, "recorded by another runner, skipping");
                report.skipped.push(name);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}

/// Apply one file inside an IMMEDIATE transaction
///
/// The ledger is checked again once the write lock is held, so a runner
/// that lost the race gets `DuplicateMigration` without executing anything.
/// Dropping the transaction on any error path rolls it back.
fn apply_file(
    conn: &mut Connection,
    file: &MigrationFile,
    run_id: &RunId,
) -> Result<MigrationRecord> {
    log_migration!(info, run_id, file.name, "Applying migration");

    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| migration_failed(&file.name, e))?;

    if Ledger::new(&tx).find(&file.name)?.is_some() {
        return Err(StoreError::DuplicateMigration {
            name: file.name.clone(),
        });
    }

    let statements = split_statements(&file.content);
    for statement in &statements {
        tx.execute_batch(statement)
            .map_err(|e| migration_failed(&file.name, e))?;
    }

    let record = Ledger::new(&tx).record(&file.name)?;
    tx.commit().map_err(|e| migration_failed(&file.name, e))?;

    log_migration!(
        debug,
        run_id,
        file.name,
        statements = statements.len(),
        "migration committed"
    );
    Ok(record)
}
