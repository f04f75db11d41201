//! Postgres to JSON Schema type conversion.
//!
//! The table is deliberately small: anything it does not list maps to
//! `string`, which the editor treats as an opaque scalar.

use crate::models::JsonSchemaType;

impl JsonSchemaType {
    /// Looks up a Postgres type name in the fixed mapping table.
    ///
    /// The lookup is case-insensitive. Returns `None` for names the table
    /// does not list.
    pub fn lookup(source_type: &str) -> Option<Self> {
        let mapped = match source_type.to_lowercase().as_str() {
            "integer" | "bigint" => Self::Integer,
            "numeric" => Self::Number,
            "text" | "varchar" | "char" => Self::String,
            "boolean" => Self::Boolean,
            "json" | "jsonb" => Self::Object,
            "timestamp" | "timestamptz" | "date" | "uuid" => Self::String,
            _ => return None,
        };
        Some(mapped)
    }

    /// Maps a Postgres type name to its JSON Schema primitive.
    ///
    /// Total: unknown names, including the empty string, map to
    /// [`JsonSchemaType::String`].
    ///
    /// # Example
    /// ```rust
    /// use supabase_schema_core::JsonSchemaType;
    ///
    /// assert_eq!(JsonSchemaType::from_source_type("BIGINT"), JsonSchemaType::Integer);
    /// assert_eq!(JsonSchemaType::from_source_type("circle"), JsonSchemaType::String);
    /// ```
    pub fn from_source_type(source_type: &str) -> Self {
        Self::lookup(source_type).unwrap_or(Self::String)
    }
}
