#![allow(dead_code)]

use tablegen_core::prelude::*;

pub const SHOP_JSON: &str = include_str!("../fixtures/shop.json");

/// The shop schema, unresolved, as a schema document would deliver it.
pub fn shop() -> Schema {
    serde_json::from_str(SHOP_JSON)
        .unwrap_or_else(|e| panic!("Failed to parse shop fixture: {e}"))
}

pub fn compile(schema: &Schema, database_type: DatabaseType) -> CompiledSchema {
    DdlAssembler::new(database_type)
        .compile(schema)
        .unwrap_or_else(|e| panic!("Failed to compile for {database_type}: {e}"))
}

/// The `CREATE TABLE` statement for `table`.
pub fn create_table<'a>(compiled: &'a CompiledSchema, table: &str) -> &'a str {
    let quoted = [
        format!("`{table}`"),
        format!("\"{table}\""),
        format!("[{table}]"),
    ];
    compiled
        .tables
        .iter()
        .find(|sql| {
            let header = sql.lines().next().unwrap_or_default();
            quoted.iter().any(|q| header.contains(q.as_str()))
        })
        .map(String::as_str)
        .unwrap_or_else(|| panic!("No CREATE TABLE for {table}"))
}

/// Body lines of a `CREATE TABLE` statement, without indentation and
/// trailing commas.
pub fn body_lines(create_table: &str) -> Vec<&str> {
    let lines: Vec<&str> = create_table.lines().collect();
    lines[1..lines.len() - 1]
        .iter()
        .map(|l| l.trim().trim_end_matches(','))
        .collect()
}
