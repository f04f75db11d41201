//! Supabase schema export tool.
//!
//! Fetches table and column metadata from a Supabase project and writes it,
//! together with derived Insert/Update/Row type shapes, into an editor
//! config directory.
//!
//! # Security Guarantees
//! - The service key is never logged or written to disk
//! - Only schema metadata is read; no row data is fetched

use clap::Parser;
use std::process::ExitCode;
use supabase_schema_core::init_logging;
use supabase_schema_export::{Cli, run};
use tracing::{debug, warn};

#[tokio::main]
async fn main() -> ExitCode {
    // .env must be loaded before clap reads its env fallbacks
    let dotenv = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(cli.global.verbose, cli.global.quiet) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }

    match run(&cli).await {
        Ok(summary) => {
            println!(
                "Schema information exported successfully to {}",
                summary.schema_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
