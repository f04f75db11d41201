//! Type definition generation.
//!
//! Turns the fetched table list into the Insert/Update/Row object shapes the
//! editor uses for completion. Generation is pure and infallible: unknown
//! column types degrade to `string` and absent optional fields are omitted.
//!
//! Insert and Update shapes are generated identically. Every property on
//! them carries `required: false` so partial payloads validate; required-ness
//! is only expressed on the Row shape.

use crate::models::{
    ColumnDescriptor, Definitions, JsonSchemaType, PropertySchema, TableDefinitions,
    TableDescriptor, TypeShape,
};
use tracing::debug;

/// Generates type definitions for every table, keyed by table name.
///
/// Output order follows input order. A repeated table name replaces the
/// earlier entry in place.
///
/// # Example
/// ```rust
/// use supabase_schema_core::{ColumnDescriptor, TableDescriptor, generate_type_definitions};
///
/// let tables = vec![TableDescriptor::new(
///     "users",
///     vec![
///         ColumnDescriptor::new("id", "uuid", false),
///         ColumnDescriptor::new("bio", "text", true),
///     ],
/// )];
///
/// let definitions = generate_type_definitions(&tables);
/// assert_eq!(definitions["users"].row.required_names(), ["id".to_string()]);
/// ```
pub fn generate_type_definitions(tables: &[TableDescriptor]) -> Definitions {
    let mut definitions = Definitions::with_capacity(tables.len());

    for table in tables {
        definitions.insert(table.table.clone(), generate_table_definitions(table));
    }

    definitions
}

/// Generates the Insert/Update/Row shapes of a single table.
pub fn generate_table_definitions(table: &TableDescriptor) -> TableDefinitions {
    let mut insert = TypeShape::object(format!("Insert type for {} table", table.table));
    let mut update = TypeShape::object(format!("Update type for {} table", table.table));
    let mut row = TypeShape::object_with_required(format!("Row type for {} table", table.table));
    let mut required = Vec::new();

    for column in &table.columns {
        if column.is_required() {
            required.push(column.name.clone());
        }

        let schema = property_schema(&table.table, column);

        insert
            .properties
            .insert(column.name.clone(), schema.optional());
        update
            .properties
            .insert(column.name.clone(), schema.optional());
        row.properties.insert(column.name.clone(), schema);
    }

    row.required = Some(required);

    TableDefinitions {
        insert,
        update,
        row,
    }
}

/// Builds the Row-variant property schema of a column.
fn property_schema(table: &str, column: &ColumnDescriptor) -> PropertySchema {
    let schema_type = JsonSchemaType::lookup(&column.data_type).unwrap_or_else(|| {
        debug!(
            "Unmapped type '{}' on {}.{}, using string",
            column.data_type, table, column.name
        );
        JsonSchemaType::String
    });

    PropertySchema {
        schema_type,
        description: column.description_text().map(str::to_string),
        default: column.default_value().map(str::to_string),
        required: None,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn users_table() -> TableDescriptor {
        TableDescriptor::new(
            "users",
            vec![
                ColumnDescriptor::new("id", "uuid", false),
                ColumnDescriptor::new("bio", "text", true),
            ],
        )
    }

    #[test]
    fn test_users_scenario() {
        let definitions = generate_type_definitions(&[users_table()]);
        let users = &definitions["users"];

        assert_eq!(users.row.required, Some(vec!["id".to_string()]));
        assert_eq!(
            users.row.properties["id"].schema_type,
            JsonSchemaType::String
        );
        assert_eq!(users.insert.properties["bio"].required, Some(false));
        assert_eq!(users.update.properties["bio"].required, Some(false));
        assert_eq!(users.row.properties["bio"].required, None);
    }

    #[test]
    fn test_shape_descriptions() {
        let definitions = generate_type_definitions(&[users_table()]);
        let users = &definitions["users"];

        assert_eq!(users.insert.description, "Insert type for users table");
        assert_eq!(users.update.description, "Update type for users table");
        assert_eq!(users.row.description, "Row type for users table");
        assert_eq!(users.row.shape_type, JsonSchemaType::Object);
        assert!(users.insert.required.is_none());
        assert!(users.update.required.is_none());
    }

    #[test]
    fn test_unmapped_type_becomes_string() {
        let table = TableDescriptor::new("shapes", vec![ColumnDescriptor::new("area", "circle", true)]);
        let definitions = generate_type_definitions(&[table]);

        assert_eq!(
            definitions["shapes"].row.properties["area"].schema_type,
            JsonSchemaType::String
        );
    }

    #[test]
    fn test_default_suppresses_requiredness() {
        let table = TableDescriptor::new(
            "counters",
            vec![ColumnDescriptor::new("value", "integer", false).with_default("0")],
        );
        let definitions = generate_type_definitions(&[table]);
        let row = &definitions["counters"].row;

        assert!(row.required_names().is_empty());
        assert_eq!(row.properties["value"].default.as_deref(), Some("0"));
        assert_eq!(row.properties["value"].schema_type, JsonSchemaType::Integer);
    }

    #[test]
    fn test_empty_default_counts_as_absent() {
        let table = TableDescriptor::new(
            "notes",
            vec![
                ColumnDescriptor::new("title", "text", false)
                    .with_default("")
                    .with_description(""),
            ],
        );
        let definitions = generate_type_definitions(&[table]);
        let row = &definitions["notes"].row;

        assert_eq!(row.required_names(), ["title".to_string()]);
        assert!(row.properties["title"].default.is_none());
        assert!(row.properties["title"].description.is_none());
    }

    #[test]
    fn test_absent_fields_are_omitted_from_json() {
        let table = TableDescriptor::new(
            "posts",
            vec![
                ColumnDescriptor::new("id", "bigint", false)
                    .with_default("nextval('posts_id_seq'::regclass)")
                    .with_description("Primary key"),
                ColumnDescriptor::new("body", "text", true),
            ],
        );
        let definitions = generate_type_definitions(&[table]);
        let json = serde_json::to_value(&definitions["posts"]).expect("serialize");

        assert_eq!(
            json["Row"]["properties"]["body"],
            serde_json::json!({"type": "string"})
        );
        assert_eq!(
            json["Insert"]["properties"]["body"],
            serde_json::json!({"type": "string", "required": false})
        );
        assert_eq!(
            json["Row"]["properties"]["id"],
            serde_json::json!({
                "type": "integer",
                "description": "Primary key",
                "default": "nextval('posts_id_seq'::regclass)"
            })
        );
        assert!(json["Insert"].get("required").is_none());
        assert_eq!(json["Row"]["required"], serde_json::json!([]));
    }

    #[test]
    fn test_table_without_columns() {
        let definitions = generate_type_definitions(&[TableDescriptor::new("empty", vec![])]);
        let empty = &definitions["empty"];

        assert!(empty.row.properties.is_empty());
        assert_eq!(empty.row.required, Some(Vec::new()));
        assert!(empty.insert.properties.is_empty());
        assert!(empty.update.properties.is_empty());
    }

    #[test]
    fn test_table_and_column_order_preserved() {
        let tables = vec![
            TableDescriptor::new(
                "zebra",
                vec![
                    ColumnDescriptor::new("z", "text", false),
                    ColumnDescriptor::new("a", "text", false),
                ],
            ),
            TableDescriptor::new("alpha", vec![]),
        ];
        let definitions = generate_type_definitions(&tables);

        let names: Vec<&str> = definitions.keys().map(String::as_str).collect();
        assert_eq!(names, ["zebra", "alpha"]);

        let zebra = &definitions["zebra"];
        let columns: Vec<&str> = zebra.row.properties.keys().map(String::as_str).collect();
        assert_eq!(columns, ["z", "a"]);
        assert_eq!(zebra.row.required_names(), ["z".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_empty_input() {
        assert!(generate_type_definitions(&[]).is_empty());
    }

    fn arb_column() -> impl Strategy<Value = ColumnDescriptor> {
        (
            "[a-z]{1,8}",
            prop::sample::select(vec!["uuid", "text", "integer", "jsonb", "circle", "BOOLEAN"]),
            any::<bool>(),
            prop::option::of(prop::sample::select(vec!["", "0", "now()"])),
        )
            .prop_map(|(name, data_type, is_nullable, column_default)| ColumnDescriptor {
                name,
                data_type: data_type.to_string(),
                is_nullable,
                column_default: column_default.map(str::to_string),
                description: None,
            })
    }

    fn arb_table() -> impl Strategy<Value = TableDescriptor> {
        prop::collection::vec(arb_column(), 0..12).prop_map(|columns| {
            // Column names are unique within a table upstream
            let mut seen = std::collections::HashSet::new();
            let columns = columns
                .into_iter()
                .filter(|c| seen.insert(c.name.clone()))
                .collect();
            TableDescriptor::new("t", columns)
        })
    }

    proptest! {
        #[test]
        fn prop_row_required_matches_columns(table in arb_table()) {
            let definitions = generate_type_definitions(std::slice::from_ref(&table));
            let expected: Vec<String> = table
                .columns
                .iter()
                .filter(|c| !c.is_nullable && c.column_default.as_deref().is_none_or(str::is_empty))
                .map(|c| c.name.clone())
                .collect();

            prop_assert_eq!(definitions["t"].row.required_names(), expected.as_slice());
        }

        #[test]
        fn prop_insert_and_update_never_required(table in arb_table()) {
            let definitions = generate_type_definitions(std::slice::from_ref(&table));
            let shapes = &definitions["t"];

            for column in &table.columns {
                prop_assert_eq!(shapes.insert.properties[&column.name].required, Some(false));
                prop_assert_eq!(shapes.update.properties[&column.name].required, Some(false));
            }
            prop_assert_eq!(&shapes.insert.properties, &shapes.update.properties);
        }
    }
}
