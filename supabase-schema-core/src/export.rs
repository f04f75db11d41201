//! Export document assembly and JSON rendering.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::Result;
use crate::error::ExportError;
use crate::models::{Definitions, EXPORT_FORMAT_VERSION, ExportDocument, SCHEMA_MARKER, TableDescriptor};

impl ExportDocument {
    /// Assembles an export document stamped with the current time.
    pub fn assemble(tables: Vec<TableDescriptor>, definitions: Definitions) -> Self {
        Self::assemble_at(tables, definitions, Utc::now())
    }

    /// Assembles an export document stamped with `captured_at`.
    ///
    /// The timestamp is rendered with millisecond precision and a `Z` suffix.
    pub fn assemble_at(
        tables: Vec<TableDescriptor>,
        definitions: Definitions,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            schema: SCHEMA_MARKER.to_string(),
            version: EXPORT_FORMAT_VERSION.to_string(),
            timestamp: captured_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            definitions,
            tables,
        }
    }

    /// Number of tables in the export.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

/// Renders a document as pretty-printed JSON with two-space indentation.
///
/// Object keys keep struct field order.
pub fn render_json<T: Serialize + ?Sized>(document: &T, context: &str) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(|e| ExportError::serialization(context, e))
}
