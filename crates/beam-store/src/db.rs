//! Database connection management
//!
//! Opens and configures the SQLite connection behind a `StoreConfig`.

use crate::config::StoreConfig;
use crate::errors::{store_unavailable, Result};
use rusqlite::Connection;

/// Open the store described by `config` and apply connection settings
///
/// Creates the database file's parent directory first when
/// `config.create_dirs` is set. Every failure is `StoreUnavailable`.
pub fn open(config: &StoreConfig) -> Result<Connection> {
    let url = config.url.as_str();

    if config.create_dirs {
        if let Some(parent) = config.url.file_path().as_deref().and_then(|p| p.parent()) {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    store_unavailable(url, format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
        }
    }

    let conn = Connection::open(url).map_err(|e| store_unavailable(url, e))?;
    configure(&conn, config)?;
    Ok(conn)
}

/// Configure a connection with the store's settings
pub fn configure(conn: &Connection, config: &StoreConfig) -> Result<()> {
    let url = config.url.as_str();

    conn.busy_timeout(config.busy_timeout)
        .map_err(|e| store_unavailable(url, e))?;

    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(|e| store_unavailable(url, e))?;

    // WAL lets readers proceed while a migration holds the write lock.
    if !config.url.is_memory() {
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
            .map_err(|e| store_unavailable(url, e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_in_memory() {
        let conn = open(&StoreConfig::in_memory()).unwrap();
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_open_creates_parent_dirs_and_uses_wal() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("data").join("beam.db");
        let config = StoreConfig::new(format!("file:{}", path.display()).as_str());

        let conn = open(&config).unwrap();
        assert!(path.exists());

        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_open_percent_encoded_path() {
        let temp = TempDir::new().unwrap();
        let url = format!("file:{}/my%20data/beam.db", temp.path().display());

        open(&StoreConfig::new(url.as_str())).unwrap();
        assert!(temp.path().join("my data").join("beam.db").exists());
        assert!(!temp.path().join("my%20data").exists());
    }

    #[test]
    fn test_open_without_create_dirs_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("beam.db");
        let config =
            StoreConfig::new(format!("file:{}", path.display()).as_str()).with_create_dirs(false);

        let err = open(&config).unwrap_err();
        assert_eq!(err.kind(), crate::errors::StoreErrorKind::StoreUnavailable);
    }
}
