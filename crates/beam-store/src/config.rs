//! Store configuration
//!
//! The composition root builds a `StoreConfig` once and passes it to
//! `Database::initialise`. Nothing here reads the environment; the CLI
//! maps `BEAM_DATABASE_URL` onto it.

use percent_encoding::percent_decode_str;
use std::path::PathBuf;
use std::time::Duration;

/// Connection string used when none is configured
pub const DEFAULT_DATABASE_URL: &str = "file:data/beam.db";

/// How long a connection waits on another process's write lock
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// A SQLite connection string such as `file:data/beam.db` or `:memory:`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseUrl(String);

impl DatabaseUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this names a private in-memory database
    pub fn is_memory(&self) -> bool {
        if self.0 == ":memory:" {
            return true;
        }
        match self.uri_parts() {
            Some((path, query)) => {
                path == ":memory:"
                    || query
                        .map(|q| q.split('&').any(|p| p == "mode=memory"))
                        .unwrap_or(false)
            }
            None => false,
        }
    }

    /// The on-disk path this URL resolves to
    ///
    /// Plain names are used as-is. For `file:` URIs the path is read the way
    /// SQLite reads it: an empty or `localhost` authority is dropped, the
    /// path ends at `?` or `#`, and `%XX` escapes are decoded. Returns
    /// `None` for in-memory and empty URLs.
    pub fn file_path(&self) -> Option<PathBuf> {
        if self.is_memory() {
            return None;
        }
        let path = match self.uri_parts() {
            Some((path, _)) => percent_decode_str(path).decode_utf8_lossy().into_owned(),
            None => self.0.clone(),
        };
        if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }

    /// Raw path and query of a `file:` URI, or `None` for a plain name
    fn uri_parts(&self) -> Option<(&str, Option<&str>)> {
        let rest = self.0.strip_prefix("file:")?;
        let rest = match rest.strip_prefix("//") {
            Some(authority_and_path) => authority_and_path
                .find('/')
                .map_or("", |slash| &authority_and_path[slash..]),
            None => rest,
        };
        let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
        Some(match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        })
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL)
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DatabaseUrl {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

/// Settings for opening the store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: DatabaseUrl,
    /// Create the database file's parent directory if missing
    pub create_dirs: bool,
    pub busy_timeout: Duration,
}

impl StoreConfig {
    pub fn new(url: impl Into<DatabaseUrl>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// A private in-memory store (tests, dry runs)
    pub fn in_memory() -> Self {
        Self::new(":memory:")
    }

    pub fn with_create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }

    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default(),
            create_dirs: true,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_url_resolves_to_data_dir() {
        let url = DatabaseUrl::default();
        assert_eq!(url.as_str(), "file:data/beam.db");
        assert_eq!(url.file_path().as_deref(), Some(Path::new("data/beam.db")));
    }

    #[test]
    fn test_file_path_strips_scheme_and_query() {
        let url = DatabaseUrl::new("file:///var/lib/beam/app.db?cache=shared");
        assert_eq!(
            url.file_path().as_deref(),
            Some(Path::new("/var/lib/beam/app.db"))
        );

        let plain = DatabaseUrl::new("store.db");
        assert_eq!(plain.file_path().as_deref(), Some(Path::new("store.db")));
    }

    #[test]
    fn test_file_path_decodes_escapes_and_drops_fragment() {
        let url = DatabaseUrl::new("file:/tmp/x/my%20data/beam.db#main");
        assert_eq!(
            url.file_path().as_deref(),
            Some(Path::new("/tmp/x/my data/beam.db"))
        );

        let url = DatabaseUrl::new("file://localhost/srv/beam%2Ddb/app.db?mode=rwc");
        assert_eq!(
            url.file_path().as_deref(),
            Some(Path::new("/srv/beam-db/app.db"))
        );
    }

    #[test]
    fn test_plain_names_are_not_decoded() {
        let plain = DatabaseUrl::new("my%20data/beam.db");
        assert_eq!(
            plain.file_path().as_deref(),
            Some(Path::new("my%20data/beam.db"))
        );
    }

    #[test]
    fn test_memory_urls_have_no_path() {
        for url in [":memory:", "file::memory:?cache=shared", "file:app?mode=memory"] {
            let url = DatabaseUrl::new(url);
            assert!(url.is_memory(), "{} should be in-memory", url);
            assert_eq!(url.file_path(), None);
        }
        assert_eq!(DatabaseUrl::new("file:").file_path(), None);
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new("file:x.db")
            .with_create_dirs(false)
            .with_busy_timeout(Duration::from_millis(250));
        assert_eq!(config.url.as_str(), "file:x.db");
        assert!(!config.create_dirs);
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
    }
}
