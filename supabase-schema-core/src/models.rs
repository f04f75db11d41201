//! Data models for fetched schema metadata and the exported documents.
//!
//! The descriptor types mirror what the `get_schema_info` RPC function
//! returns. The shape and document types define the JSON written for the
//! editor; their field order is the key order of the emitted JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// JSON Schema dialect marker written at the top of every export
pub const SCHEMA_MARKER: &str = "http://json-schema.org/draft-07/schema#";

/// Format version of the export and config documents
pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// File name of the exported schema document
pub const SCHEMA_FILE_NAME: &str = "supabase-schema.json";

/// File name of the editor config pointer document
pub const CONFIG_FILE_NAME: &str = "config.json";

/// A single column as reported by the upstream schema call
///
/// Deserialization never rejects odd values: `is_nullable` follows JSON
/// truthiness (plus `YES`/`NO`), and non-string defaults, descriptions and
/// type names are kept as their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Source (Postgres) type name, free-form
    #[serde(rename = "type", default, deserialize_with = "deserialize_type_name")]
    pub data_type: String,
    #[serde(default, deserialize_with = "deserialize_nullable_flag")]
    pub is_nullable: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub column_default: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

impl ColumnDescriptor {
    /// Creates a column without default or description.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, is_nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            is_nullable,
            column_default: None,
            description: None,
        }
    }

    /// Sets the column default expression.
    pub fn with_default(mut self, column_default: impl Into<String>) -> Self {
        self.column_default = Some(column_default.into());
        self
    }

    /// Sets the column description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Default expression, treating an empty string as absent.
    pub fn default_value(&self) -> Option<&str> {
        non_empty(self.column_default.as_deref())
    }

    /// Description, treating an empty string as absent.
    pub fn description_text(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    /// Whether a row must carry this column explicitly.
    ///
    /// True only for non-nullable columns without a default.
    pub fn is_required(&self) -> bool {
        !self.is_nullable && self.default_value().is_none()
    }
}

/// A table and its columns, in the order the upstream call returned them
///
/// A descriptor parsed from JSON keeps that JSON and serializes back to it
/// unchanged, including keys the typed fields do not cover. A descriptor
/// built with [`TableDescriptor::new`] serializes its typed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct TableDescriptor {
    pub table: String,
    pub columns: Vec<ColumnDescriptor>,
    source: Option<Value>,
}

impl TableDescriptor {
    /// Creates a table descriptor.
    pub fn new(table: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            table: table.into(),
            columns,
            source: None,
        }
    }

    /// The upstream JSON this descriptor was parsed from, if any.
    pub fn source(&self) -> Option<&Value> {
        self.source.as_ref()
    }
}

/// Typed view of an upstream table object
#[derive(Deserialize)]
struct TableFields {
    table: String,
    #[serde(default, deserialize_with = "deserialize_columns")]
    columns: Vec<ColumnDescriptor>,
}

impl TryFrom<Value> for TableDescriptor {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        let fields = TableFields::deserialize(&value)?;
        Ok(Self {
            table: fields.table,
            columns: fields.columns,
            source: Some(value),
        })
    }
}

impl From<TableDescriptor> for Value {
    fn from(descriptor: TableDescriptor) -> Self {
        match descriptor.source {
            Some(source) => source,
            None => serde_json::json!({
                "table": descriptor.table,
                "columns": descriptor.columns,
            }),
        }
    }
}

/// JSON Schema primitive type names a column can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonSchemaType {
    Integer,
    Number,
    String,
    Boolean,
    Object,
}

impl JsonSchemaType {
    /// The JSON Schema keyword for this type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Object => "object",
        }
    }
}

impl std::fmt::Display for JsonSchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema fragment for a single column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub schema_type: JsonSchemaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Present on Insert/Update properties only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl PropertySchema {
    /// Copy of this schema carrying an explicit `required: false`.
    pub fn optional(&self) -> Self {
        Self {
            required: Some(false),
            ..self.clone()
        }
    }
}

/// One of the Insert/Update/Row object shapes of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeShape {
    pub description: String,
    #[serde(rename = "type")]
    pub shape_type: JsonSchemaType,
    /// Present on the Row shape only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    pub properties: IndexMap<String, PropertySchema>,
}

impl TypeShape {
    /// Empty object shape without a `required` list.
    pub fn object(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            shape_type: JsonSchemaType::Object,
            required: None,
            properties: IndexMap::new(),
        }
    }

    /// Empty object shape with an empty `required` list.
    pub fn object_with_required(description: impl Into<String>) -> Self {
        Self {
            required: Some(Vec::new()),
            ..Self::object(description)
        }
    }

    /// Names listed as required, empty when the shape has no list.
    pub fn required_names(&self) -> &[String] {
        self.required.as_deref().unwrap_or_default()
    }
}

/// The three generated shapes of one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableDefinitions {
    pub insert: TypeShape,
    pub update: TypeShape,
    pub row: TypeShape,
}

/// Table name to generated shapes, in table order
pub type Definitions = IndexMap<String, TableDefinitions>;

/// The document written to `supabase-schema.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub version: String,
    /// ISO-8601 UTC instant captured at assembly
    pub timestamp: String,
    pub definitions: Definitions,
    pub tables: Vec<TableDescriptor>,
}

/// Pointer entry inside the editor config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaPointer {
    pub path: String,
    #[serde(rename = "type")]
    pub source_type: String,
}

/// The document written to `config.json` on first run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    pub version: String,
    pub schemas: BTreeMap<String, SchemaPointer>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let mut schemas = BTreeMap::new();
        schemas.insert(
            "supabase".to_string(),
            SchemaPointer {
                path: format!("./{}", SCHEMA_FILE_NAME),
                source_type: "postgres".to_string(),
            },
        );
        Self {
            version: EXPORT_FORMAT_VERSION.to_string(),
            schemas,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Reads `is_nullable` by JSON truthiness, with `YES`/`NO` and
/// `true`/`false` strings read case-insensitively.
fn deserialize_nullable_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(value) => value,
        Value::Number(number) => number.as_f64() != Some(0.0),
        Value::String(text) => !matches!(text.to_ascii_lowercase().as_str(), "" | "no" | "false"),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Optional text; non-string values keep their JSON text.
fn deserialize_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

fn deserialize_type_name<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_text(deserializer)?.unwrap_or_default())
}

fn deserialize_columns<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<ColumnDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ColumnDescriptor>>::deserialize(deserializer)?.unwrap_or_default())
}
