//! Error handling for beam-store
//!
//! Every failure the store can report at startup, with a stable kind and
//! code for logging. All of them except `DuplicateMigration` are fatal to
//! startup; the runner turns `DuplicateMigration` into a skip.

use beam_core_types::ErrorCode;
use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Stable classification of store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    StoreUnavailable,
    LedgerInit,
    Discovery,
    MigrationFailed,
    DuplicateMigration,
    Query,
}

impl StoreErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorKind::StoreUnavailable => "ERR_STORE_UNAVAILABLE",
            StoreErrorKind::LedgerInit => "ERR_LEDGER_INIT",
            StoreErrorKind::Discovery => "ERR_DISCOVERY",
            StoreErrorKind::MigrationFailed => "ERR_MIGRATION_FAILED",
            StoreErrorKind::DuplicateMigration => "ERR_DUPLICATE_MIGRATION",
            StoreErrorKind::Query => "ERR_QUERY",
        }
    }

    /// Short name used in the `err_kind` log field
    pub fn name(&self) -> &'static str {
        match self {
            StoreErrorKind::StoreUnavailable => "StoreUnavailable",
            StoreErrorKind::LedgerInit => "LedgerInit",
            StoreErrorKind::Discovery => "Discovery",
            StoreErrorKind::MigrationFailed => "MigrationFailed",
            StoreErrorKind::DuplicateMigration => "DuplicateMigration",
            StoreErrorKind::Query => "Query",
        }
    }
}

/// Store error taxonomy
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database could not be opened or configured
    #[error("[ERR_STORE_UNAVAILABLE] cannot open store {url}: {reason}")]
    StoreUnavailable { url: String, reason: String },

    /// The migrations ledger table could not be created or verified
    #[error("[ERR_LEDGER_INIT] cannot prepare migrations table: {reason}")]
    LedgerInit { reason: String },

    /// The migration bundle could not be listed or a file could not be read
    #[error("[ERR_DISCOVERY] {message}")]
    Discovery { message: String },

    /// A statement or the ledger insert of one migration failed
    #[error("[ERR_MIGRATION_FAILED] migration {name} failed: {cause}")]
    MigrationFailed {
        name: String,
        #[source]
        cause: rusqlite::Error,
    },

    /// Another runner recorded this migration first
    #[error("[ERR_DUPLICATE_MIGRATION] migration {name} was already recorded by another runner")]
    DuplicateMigration { name: String },

    /// A ledger read failed outside of any migration
    #[error("[ERR_QUERY] {op} failed: {cause}")]
    Query {
        op: &'static str,
        #[source]
        cause: rusqlite::Error,
    },
}

impl StoreError {
    /// Get the error kind
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::StoreUnavailable { .. } => StoreErrorKind::StoreUnavailable,
            StoreError::LedgerInit { .. } => StoreErrorKind::LedgerInit,
            StoreError::Discovery { .. } => StoreErrorKind::Discovery,
            StoreError::MigrationFailed { .. } => StoreErrorKind::MigrationFailed,
            StoreError::DuplicateMigration { .. } => StoreErrorKind::DuplicateMigration,
            StoreError::Query { .. } => StoreErrorKind::Query,
        }
    }

    /// Name of the migration involved, if any
    pub fn migration_name(&self) -> Option<&str> {
        match self {
            StoreError::MigrationFailed { name, .. } | StoreError::DuplicateMigration { name } => {
                Some(name)
            }
            _ => None,
        }
    }
}

impl ErrorCode for StoreError {
    fn code(&self) -> &'static str {
        self.kind().code()
    }

    fn kind_name(&self) -> &'static str {
        self.kind().name()
    }
}

/// Create a store-unavailable error
pub fn store_unavailable(url: &str, reason: impl std::fmt::Display) -> StoreError {
    StoreError::StoreUnavailable {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a ledger-init error
pub fn ledger_init(reason: impl std::fmt::Display) -> StoreError {
    StoreError::LedgerInit {
        reason: reason.to_string(),
    }
}

/// Create a discovery error
pub fn discovery(message: impl Into<String>) -> StoreError {
    StoreError::Discovery {
        message: message.into(),
    }
}

/// Create a migration failure from a rusqlite::Error
pub fn migration_failed(name: &str, cause: rusqlite::Error) -> StoreError {
    StoreError::MigrationFailed {
        name: name.to_string(),
        cause,
    }
}

/// Wrap a rusqlite::Error raised by a ledger read
pub fn query_error(op: &'static str) -> impl FnOnce(rusqlite::Error) -> StoreError {
    move |cause| StoreError::Query { op, cause }
}

/// Whether a rusqlite::Error is a UNIQUE constraint violation
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
