//! Inheritance resolution through the public API.

mod common;

use common::shop;
use tablegen_core::prelude::*;

fn field_names<'a>(schema: &'a Schema, table: &str) -> Vec<&'a str> {
    schema
        .get_table(table)
        .unwrap_or_else(|| panic!("missing table {table}"))
        .fields
        .iter()
        .map(|f| f.name.as_str())
        .collect()
}

#[test]
fn test_child_override_keeps_parent_position() {
    let schema = Schema::new("s")
        .table(
            Table::new("p")
                .field(Field::new("a", FieldType::Integer))
                .field(Field::new("b", FieldType::Integer)),
        )
        .table(
            Table::new("c")
                .extends("p")
                .field(Field::new("b", FieldType::String).length(10))
                .field(Field::new("c", FieldType::Integer)),
        );

    let resolution = resolve(schema);
    assert!(resolution.is_clean());
    assert_eq!(field_names(&resolution.schema, "c"), ["a", "b", "c"]);
    let b = resolution.schema.get_table("c").unwrap().get_field("b").unwrap();
    assert_eq!(b.field_type, FieldType::String);
    assert_eq!(b.length, Some(10));
}

#[test]
fn test_shop_tables_inherit_audit_columns() {
    let resolution = resolve(shop());
    assert!(resolution.is_clean());
    assert_eq!(
        field_names(&resolution.schema, "users"),
        ["id", "created_at", "updated_at", "email", "name", "active"]
    );
    assert_eq!(
        field_names(&resolution.schema, "orders"),
        ["id", "created_at", "updated_at", "user_id", "total", "note"]
    );
}

#[test]
fn test_resolution_is_idempotent() {
    let once = resolve(shop()).schema;
    let twice = resolve(once.clone()).schema;
    assert_eq!(once, twice);

    let sql_once = compile_schema(&once, DatabaseType::Mysql).unwrap();
    let sql_twice = compile_schema(&twice, DatabaseType::Mysql).unwrap();
    assert_eq!(sql_once, sql_twice);
}

#[test]
fn test_mutual_extension_terminates_with_warning() {
    let schema = Schema::new("s")
        .table(
            Table::new("a")
                .extends("b")
                .field(Field::new("x", FieldType::Integer)),
        )
        .table(
            Table::new("b")
                .extends("a")
                .field(Field::new("y", FieldType::Integer)),
        );

    let compiled = DdlAssembler::new(DatabaseType::Mysql).compile(&schema).unwrap();
    assert_eq!(compiled.tables.len(), 2);
    assert!(compiled
        .warnings
        .iter()
        .any(|w| matches!(w, SchemaError::CyclicInheritance { .. })));

    let err = DdlAssembler::new(DatabaseType::Mysql)
        .with_options(CompileOptions::new().mode(ResolveMode::Strict))
        .compile(&schema)
        .unwrap_err();
    assert!(err.to_string().starts_with("Circular inheritance detected"));
}

#[test]
fn test_legacy_document_is_normalized() {
    let json = r#"{
        "name": "legacy",
        "tables": [{
            "name": "items",
            "fields": [
                { "name": "id", "type": "bigint", "primaryKey": "SINGLE", "autoIncrement": true },
                { "name": "label", "type": "varchar2", "length": 40 }
            ]
        }]
    }"#;
    let schema: Schema = serde_json::from_str(json).unwrap();
    let resolved = resolve(schema).schema;
    let id = &resolved.tables[0].fields[0];
    assert_eq!(id.primary_key, PrimaryKeyKind::AutoIncrement);
    assert!(!id.auto_increment);

    let sql = compile_schema(&resolved, DatabaseType::Postgresql).unwrap();
    assert!(sql.contains("\"id\" BIGSERIAL"));
    assert!(sql.contains("\"label\" VARCHAR(40)"));
}

#[test]
fn test_missing_parent_still_compiles_own_fields() {
    let schema = Schema::new("s").table(
        Table::new("orphan")
            .extends("ghost")
            .field(Field::new("id", FieldType::Integer).primary_key(PrimaryKeyKind::Single)),
    );
    let compiled = DdlAssembler::new(DatabaseType::Sqlserver).compile(&schema).unwrap();
    assert_eq!(
        compiled.warnings,
        [SchemaError::MissingParent {
            table: "orphan".to_string(),
            parent: "ghost".to_string(),
        }]
    );
    assert_eq!(compiled.tables, ["CREATE TABLE [orphan] (\n    [id] INT,\n    PRIMARY KEY ([id])\n)"]);
}
