//! Beam CLI
//!
//! Composition root for the store: loads configuration, initialises
//! logging, and brings the database schema up to date.

use beam_logging::Profile;
use beam_store::config::DEFAULT_DATABASE_URL;
use beam_store::StoreConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "beam")]
#[command(about = "Beam - customer and subscription administration", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// SQLite connection string
    #[arg(long, global = true, env = "BEAM_DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database: String,

    /// Log output format
    #[arg(long, global = true, env = "BEAM_LOG_FORMAT", value_enum)]
    #[arg(default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl GlobalArgs {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.database.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable
    Pretty,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    fn profile(self) -> Profile {
        match self {
            LogFormat::Pretty => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending migrations
    Migrate(commands::migrate::MigrateArgs),
    /// Show applied and pending migrations
    Status(commands::status::StatusArgs),
}

fn main() {
    // A missing .env is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    beam_logging::init(cli.global.log_format.profile());

    let result = match cli.command {
        Commands::Migrate(args) => commands::migrate::execute(&cli.global, args),
        Commands::Status(args) => commands::status::execute(&cli.global, args),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "startup aborted");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
