//! Migrate command
//!
//! Usage: beam migrate [--dir <PATH>]

use crate::GlobalArgs;
use beam_store::Database;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Read migrations from this directory instead of the built-in bundle
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

/// Execute migrate command
pub fn execute(global: &GlobalArgs, args: MigrateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let source = super::migration_source(args.dir);

    let mut db = Database::open(&global.store_config())?;
    let report = db.migrate(&*source)?;

    for name in &report.applied {
        println!("Applied {}", name);
    }
    println!(
        "✓ {} up to date ({} applied, {} already applied)",
        db.url(),
        report.applied.len(),
        report.skipped.len()
    );

    Ok(())
}
