pub mod migrate;
pub mod status;

use beam_store::migrations::{DirMigrations, EmbeddedMigrations, MigrationSource};
use std::path::PathBuf;

/// The embedded bundle, or a directory when one is given
fn migration_source(dir: Option<PathBuf>) -> Box<dyn MigrationSource> {
    match dir {
        Some(dir) => Box::new(DirMigrations::new(dir)),
        None => Box::new(EmbeddedMigrations),
    }
}
