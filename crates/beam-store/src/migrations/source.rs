//! Migration sources
//!
//! A source lists migration files sorted by name. The application ships
//! `EmbeddedMigrations`, compiled in from `migrations/*.sql`; operators and
//! tests can point the runner at a directory or an in-memory list instead.

use crate::errors::{discovery, Result};
use crate::migrations::types::MigrationFile;
use rust_embed::Embed;
use std::path::{Path, PathBuf};

/// Somewhere migration files come from
pub trait MigrationSource {
    /// All migration files, sorted ascending by name
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Discovery` if the files cannot be listed or read,
    /// or if two files share a name.
    fn files(&self) -> Result<Vec<MigrationFile>>;
}

/// Sort by name (byte order) and reject duplicate names
fn into_ordered(mut files: Vec<MigrationFile>) -> Result<Vec<MigrationFile>> {
    files.sort_by(|a, b| a.name.cmp(&b.name));
    if let Some(pair) = files.windows(2).find(|w| w[0].name == w[1].name) {
        return Err(discovery(format!(
            "duplicate migration name {}",
            pair[0].name
        )));
    }
    Ok(files)
}

fn is_sql_file_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| ext == "sql")
        .unwrap_or(false)
}

#[derive(Embed)]
#[folder = "migrations/"]
struct Bundle;

/// The migrations compiled into this binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedMigrations;

impl MigrationSource for EmbeddedMigrations {
    fn files(&self) -> Result<Vec<MigrationFile>> {
        let mut files = Vec::new();

        // Top-level `.sql` entries only.
        for name in Bundle::iter().filter(|n| !n.contains('/') && is_sql_file_name(n)) {
            let file = Bundle::get(&name)
                .ok_or_else(|| discovery(format!("embedded migration {} is missing", name)))?;
            let content = String::from_utf8(file.data.into_owned()).map_err(|e| {
                discovery(format!("embedded migration {} is not UTF-8: {}", name, e))
            })?;
            files.push(MigrationFile::new(name.into_owned(), content));
        }

        into_ordered(files)
    }
}

/// Migrations read from a directory on disk
#[derive(Debug, Clone)]
pub struct DirMigrations {
    dir: PathBuf,
}

impl DirMigrations {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl MigrationSource for DirMigrations {
    fn files(&self) -> Result<Vec<MigrationFile>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            discovery(format!(
                "error reading migrations directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| discovery(format!("error reading migrations directory: {}", e)))?
                .path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !path.is_file() || !is_sql_file_name(name) {
                continue;
            }
            let content = std::fs::read_to_string(&path).map_err(|e| {
                discovery(format!("error reading migration file {}: {}", name, e))
            })?;
            files.push(MigrationFile::new(name, content));
        }

        into_ordered(files)
    }
}

/// An in-memory list of migrations
#[derive(Debug, Clone, Default)]
pub struct StaticMigrations {
    files: Vec<MigrationFile>,
}

impl StaticMigrations {
    pub fn new<N, C>(files: impl IntoIterator<Item = (N, C)>) -> Self
    where
        N: Into<String>,
        C: Into<String>,
    {
        Self {
            files: files
                .into_iter()
                .map(|(name, content)| MigrationFile::new(name, content))
                .collect(),
        }
    }
}

impl MigrationSource for StaticMigrations {
    fn files(&self) -> Result<Vec<MigrationFile>> {
        into_ordered(self.files.clone())
    }
}

impl<S: MigrationSource + ?Sized> MigrationSource for &S {
    fn files(&self) -> Result<Vec<MigrationFile>> {
        (**self).files()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_bundle_is_sorted_sql() {
        let files = EmbeddedMigrations.files().unwrap();
        assert!(!files.is_empty());
        assert!(files.iter().all(|f| f.name.ends_with(".sql")));
        let names: Vec<_> = files.iter().map(|f| f.name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names[0], "0001_customers.sql");
    }

    #[test]
    fn test_static_source_sorts_by_name() {
        let source = StaticMigrations::new([
            ("0010_c.sql", "SELECT 3"),
            ("0001_a.sql", "SELECT 1"),
            ("0002_b.sql", "SELECT 2"),
        ]);
        let names: Vec<_> = source.files().unwrap().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["0001_a.sql", "0002_b.sql", "0010_c.sql"]);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let source =
            StaticMigrations::new([("0001_a.sql", "SELECT 1"), ("0001_a.sql", "SELECT 2")]);
        let err = source.files().unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::Discovery);
    }

    #[test]
    fn test_dir_source_reads_only_sql_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("0002_b.sql"), "SELECT 2;").unwrap();
        std::fs::write(temp.path().join("0001_a.sql"), "SELECT 1;").unwrap();
        std::fs::write(temp.path().join("README.md"), "notes").unwrap();
        std::fs::create_dir(temp.path().join("0003_dir.sql")).unwrap();

        let files = DirMigrations::new(temp.path()).files().unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["0001_a.sql", "0002_b.sql"]);
        assert_eq!(files[0].content, "SELECT 1;");
    }

    #[test]
    fn test_dir_source_missing_directory() {
        let temp = TempDir::new().unwrap();
        let err = DirMigrations::new(temp.path().join("nope"))
            .files()
            .unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::Discovery);
    }
}
