//! Core library for exporting Supabase schema metadata to editor tooling.
//!
//! The crate fetches table and column metadata from a Supabase project,
//! derives Insert/Update/Row JSON-Schema-like shapes for every table, and
//! writes the result plus a small editor config next to each other.
//!
//! # Security Guarantees
//! - Service keys are held in zeroizing storage and never logged
//! - Service URLs are redacted before they reach log output
//! - Only schema metadata is read; no row data is fetched
//!
//! # Architecture
//! - [`SchemaFetcher`] and [`SchemaWriter`] abstract the remote source and
//!   the local target so generation and assembly stay pure
//! - [`generate_type_definitions`] and [`ExportDocument::assemble`] hold all
//!   of the transformation logic
//! - [`run_export`] sequences one export run

pub mod config;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod type_mapping;
pub mod typegen;

// Re-export commonly used types
pub use config::{DEFAULT_OUTPUT_DIR, ExportConfig, ServiceKey};
pub use error::{ExportError, Result};
pub use export::render_json;
pub use fetcher::{SchemaFetcher, SupabaseFetcher};
pub use logging::init_logging;
pub use models::{
    ColumnDescriptor, Definitions, EditorConfig, ExportDocument, JsonSchemaType, PropertySchema,
    TableDefinitions, TableDescriptor, TypeShape,
};
pub use output::{FsWriter, SchemaWriter};
pub use pipeline::{ExportSummary, run_export};
pub use typegen::generate_type_definitions;
