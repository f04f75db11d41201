//! The fetch, generate, assemble and write sequence of one export run.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::Result;
use crate::export::render_json;
use crate::fetcher::SchemaFetcher;
use crate::models::{CONFIG_FILE_NAME, EditorConfig, ExportDocument, SCHEMA_FILE_NAME};
use crate::output::SchemaWriter;
use crate::typegen::generate_type_definitions;

/// What an export run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Path of the written schema document
    pub schema_path: PathBuf,
    /// Path of the editor config document
    pub config_path: PathBuf,
    /// Whether the config document was created by this run
    pub config_created: bool,
    /// Number of exported tables
    pub table_count: usize,
}

/// Runs one export into `output_dir`.
///
/// Steps run strictly in order: fetch, generate, assemble, create the
/// directory, write the schema file, write the config file if absent. The
/// first failure aborts the run; a schema file written before a config
/// failure is left in place.
///
/// # Errors
/// Propagates fetch, serialization and I/O errors unchanged.
pub async fn run_export(
    fetcher: &dyn SchemaFetcher,
    writer: &dyn SchemaWriter,
    output_dir: &Path,
) -> Result<ExportSummary> {
    let tables = fetcher.fetch_schema().await?;

    let definitions = generate_type_definitions(&tables);
    let document = ExportDocument::assemble(tables, definitions);
    let schema_json = render_json(&document, "export document")?;
    let config_json = render_json(&EditorConfig::default(), "editor config")?;

    writer.ensure_directory(output_dir).await?;

    let schema_path = output_dir.join(SCHEMA_FILE_NAME);
    writer.write_json(&schema_path, &schema_json).await?;
    info!("Wrote {}", schema_path.display());

    let config_path = output_dir.join(CONFIG_FILE_NAME);
    let config_created = writer.write_if_absent(&config_path, &config_json).await?;
    if config_created {
        info!("Created {}", config_path.display());
    } else {
        info!("Kept existing {}", config_path.display());
    }

    Ok(ExportSummary {
        schema_path,
        config_path,
        config_created,
        table_count: document.table_count(),
    })
}
