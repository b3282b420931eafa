//! Startup entry point
//!
//! `Database` owns the connection for the life of the process. Build one
//! with `Database::initialise` in the composition root before anything
//! starts serving; a returned handle always has a current schema.

use crate::config::{DatabaseUrl, StoreConfig};
use crate::db;
use crate::errors::Result;
use crate::migrations::{
    apply_all, status, EmbeddedMigrations, Ledger, MigrationReport, MigrationSource, StatusReport,
};
use rusqlite::Connection;

/// An open store with an initialised ledger
pub struct Database {
    conn: Connection,
    url: DatabaseUrl,
}

impl Database {
    /// Open the store and apply the embedded migrations
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` or `LedgerInit` if the store cannot be prepared;
    /// any runner error if a migration fails. All are fatal to startup.
    pub fn initialise(config: &StoreConfig) -> Result<Self> {
        Self::initialise_with(config, &EmbeddedMigrations)
    }

    /// Open the store and apply migrations from `source`
    ///
    /// # Errors
    ///
    /// As `initialise`.
    pub fn initialise_with(config: &StoreConfig, source: &dyn MigrationSource) -> Result<Self> {
        let mut database = Self::open(config)?;
        database.migrate(source)?;
        Ok(database)
    }

    /// Open the store and create the ledger table, without migrating
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the store cannot be opened or configured,
    /// `LedgerInit` if the ledger table cannot be created.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let conn = db::open(config)?;
        Ledger::new(&conn).ensure_table()?;
        tracing::debug!(url = %config.url, "store opened");
        Ok(Self {
            conn,
            url: config.url.clone(),
        })
    }

    /// Apply pending migrations from `source`
    ///
    /// # Errors
    ///
    /// See [`apply_all`].
    pub fn migrate(&mut self, source: &dyn MigrationSource) -> Result<MigrationReport> {
        apply_all(&mut self.conn, source)
    }

    /// Applied/pending state of `source`
    ///
    /// # Errors
    ///
    /// See [`status`].
    pub fn status(&self, source: &dyn MigrationSource) -> Result<StatusReport> {
        status(&self.conn, source)
    }

    /// Ledger queries on this store
    pub fn ledger(&self) -> Ledger<'_> {
        Ledger::new(&self.conn)
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    pub fn url(&self) -> &DatabaseUrl {
        &self.url
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").field("url", &self.url).finish()
    }
}
