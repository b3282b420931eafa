//! The migrations ledger
//!
//! One row per applied migration file. Rows are only ever inserted, and
//! only inside the transaction that ran the file's statements.

use crate::errors::{
    is_unique_violation, ledger_init, migration_failed, query_error, Result, StoreError,
};
use crate::migrations::types::MigrationRecord;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

/// Name of the ledger table
pub const LEDGER_TABLE: &str = "migrations";

const CREATE_LEDGER: &str = "CREATE TABLE IF NOT EXISTS migrations (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    applied TIMESTAMP NOT NULL
)";

const LEDGER_COLUMNS: [&str; 3] = ["id", "name", "applied"];

/// Ledger queries over a connection or an open transaction
pub struct Ledger<'c> {
    conn: &'c Connection,
}

impl<'c> Ledger<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Create the ledger table if it doesn't exist, then check its shape
    ///
    /// A pre-existing `migrations` table must have `id`, `name` and
    /// `applied` columns and a unique index on `name`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LedgerInit` if the table cannot be created or
    /// an existing table has a different layout.
    pub fn ensure_table(&self) -> Result<()> {
        self.conn.execute_batch(CREATE_LEDGER).map_err(ledger_init)?;
        self.verify_table()
    }

    fn verify_table(&self) -> Result<()> {
        let columns = self.pragma_names("SELECT name FROM pragma_table_info(?1)", LEDGER_TABLE)?;
        let missing: Vec<_> = LEDGER_COLUMNS
            .iter()
            .filter(|c| !columns.iter().any(|have| have == *c))
            .collect();
        if !missing.is_empty() {
            return Err(ledger_init(format!(
                "existing {} table lacks column(s) {:?}",
                LEDGER_TABLE, missing
            )));
        }

        let unique_indexes = self.pragma_names(
            "SELECT name FROM pragma_index_list(?1) WHERE \"unique\" = 1",
            LEDGER_TABLE,
        )?;
        for index in &unique_indexes {
            let indexed = self.pragma_names("SELECT name FROM pragma_index_info(?1)", index)?;
            if indexed == ["name"] {
                return Ok(());
            }
        }
        Err(ledger_init(format!(
            "existing {} table has no unique index on name",
            LEDGER_TABLE
        )))
    }

    fn pragma_names(&self, sql: &str, arg: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(sql).map_err(ledger_init)?;
        let names = stmt
            .query_map([arg], |row| row.get::<_, String>(0))
            .map_err(ledger_init)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(ledger_init)?;
        Ok(names)
    }

    /// Look up the record for `name`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Query` if the lookup fails.
    pub fn find(&self, name: &str) -> Result<Option<MigrationRecord>> {
        self.conn
            .query_row(
                "SELECT id, name, applied FROM migrations WHERE name = ?1",
                [name],
                map_record,
            )
            .optional()
            .map_err(query_error("ledger_find"))
    }

    /// Insert a record for `name` and return it as stored
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateMigration` if `name` is already
    /// recorded, `StoreError::MigrationFailed` for any other failure.
    pub fn record(&self, name: &str) -> Result<MigrationRecord> {
        let id = Uuid::new_v4().to_string();
        self.conn
            .query_row(
                "INSERT INTO migrations (id, name, applied) VALUES (?1, ?2, ?3)
                 RETURNING id, name, applied",
                params![id, name, Utc::now()],
                map_record,
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::DuplicateMigration {
                        name: name.to_string(),
                    }
                } else {
                    migration_failed(name, e)
                }
            })
    }

    /// All records in insertion order
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Query` if the ledger cannot be read.
    pub fn list(&self) -> Result<Vec<MigrationRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, applied FROM migrations ORDER BY rowid")
            .map_err(query_error("ledger_list"))?;
        let records = stmt
            .query_map([], map_record)
            .map_err(query_error("ledger_list"))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(query_error("ledger_list"))?;
        Ok(records)
    }
}

fn map_record(row: &Row<'_>) -> rusqlite::Result<MigrationRecord> {
    Ok(MigrationRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        applied_at: row.get(2)?,
    })
}
