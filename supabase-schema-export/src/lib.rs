//! Library module for supabase-schema-export
//!
//! Holds the CLI definition and the run entry point so both can be tested
//! without spawning the binary. `main.rs` only wires process concerns
//! (`.env` loading, logging, exit codes) around [`run`].

use anyhow::Context;
use clap::{Args, Parser};
use std::path::PathBuf;
use supabase_schema_core::{
    DEFAULT_OUTPUT_DIR, ExportConfig, ExportSummary, FsWriter, SupabaseFetcher, run_export,
};
use tracing::info;

/// Environment variable holding the project URL
pub const URL_ENV: &str = "SUPABASE_URL";

/// Environment variable holding the service role key
pub const KEY_ENV: &str = "SUPABASE_SERVICE_ROLE_KEY";

/// CLI argument structure
///
/// Not `Debug`: it holds the raw service key.
#[derive(Parser)]
#[command(name = "supabase-schema-export")]
#[command(about = "Export Supabase schema information for Cursor")]
#[command(version)]
#[command(long_about = "
Supabase Schema Export - schema metadata for editor tooling

Calls the get_schema_info RPC function of a Supabase project and writes:
- supabase-schema.json: tables, columns and Insert/Update/Row type shapes
- config.json: editor pointer to the schema file (created once, never updated)

The URL and key may also come from SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY,
including values set in a .env file in the working directory. Flags take
precedence over the environment.

EXAMPLES:
  supabase-schema-export --url https://abc.supabase.co --key $SERVICE_KEY
  supabase-schema-export -o .cursor/schemas
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Supabase project URL
    #[arg(short, long, env = URL_ENV, help = "Supabase project URL")]
    pub url: String,

    /// Supabase service role key
    #[arg(
        short,
        long,
        env = KEY_ENV,
        hide_env_values = true,
        help = "Supabase service role key (never logged)"
    )]
    pub key: String,

    /// Output directory
    #[arg(
        short,
        long,
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Output directory"
    )]
    pub output: PathBuf,
}

/// Verbosity flags shared with logging setup
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all log output except errors")]
    pub quiet: bool,
}

impl Cli {
    /// Builds the validated export configuration from parsed arguments.
    ///
    /// # Errors
    /// Returns a configuration error for a malformed URL or blank key.
    pub fn export_config(&self) -> supabase_schema_core::Result<ExportConfig> {
        ExportConfig::new(&self.url, self.key.clone(), self.output.clone())
    }
}

/// Runs one export with the production fetcher and filesystem writer.
///
/// # Errors
/// Returns the first configuration, fetch, serialization or I/O failure.
pub async fn run(cli: &Cli) -> anyhow::Result<ExportSummary> {
    let config = cli.export_config().context("Invalid arguments")?;

    info!("Exporting schema from {}", config.redacted_url());
    info!("Output: {}", config.output_dir().display());

    let fetcher = SupabaseFetcher::new(&config)?;
    let summary = run_export(&fetcher, &FsWriter, config.output_dir()).await?;

    info!("✓ Exported {} tables", summary.table_count);
    Ok(summary)
}
