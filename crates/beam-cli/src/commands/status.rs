//! Status command
//!
//! Usage: beam status [--dir <PATH>] [--json]

use crate::GlobalArgs;
use beam_store::Database;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Compare against this directory instead of the built-in bundle
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute status command
pub fn execute(global: &GlobalArgs, args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let source = super::migration_source(args.dir);

    let db = Database::open(&global.store_config())?;
    let report = db.status(&*source)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for migration in &report.migrations {
        match migration.applied_at {
            Some(at) => println!("applied  {}  {}", at.to_rfc3339(), migration.name),
            None => println!("pending  {:<25}  {}", "-", migration.name),
        }
    }
    for record in &report.unknown {
        println!("unknown  {}  {}", record.applied_at.to_rfc3339(), record.name);
    }

    Ok(())
}
