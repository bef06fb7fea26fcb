//! DDL assembly.
//!
//! The assembler resolves a schema, then asks a [`Dialect`] for every
//! statement needed to create it: the database, each table, the standalone
//! indexes and foreign keys the dialect does not embed, comment statements
//! and the sequences backing SEQUENCE keys. Column defaults that draw from a
//! sequence are bound last, once every sequence exists.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dialect::{sequence_name, DatabaseType, Dialect};
use crate::error::{Result, SchemaError};
use crate::resolver::{InheritanceResolver, ResolveMode};
use crate::schema::{Schema, Table};

/// Order in which tables are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableOrder {
    /// Declaration order; sequences come last.
    #[default]
    Declaration,
    /// Referenced tables before the tables pointing at them; sequences come
    /// first. Cycles fall back to declaration order.
    Dependency,
}

/// Options for a compile call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// How schema problems are handled.
    pub mode: ResolveMode,
    /// Table emission order.
    pub order: TableOrder,
    /// Overrides the schema charset in `CREATE DATABASE`.
    pub charset: Option<String>,
    /// Overrides the schema collation in `CREATE DATABASE`.
    pub collation: Option<String>,
}

impl CompileOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resolve mode.
    #[must_use]
    pub const fn mode(mut self, mode: ResolveMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the table order.
    #[must_use]
    pub const fn order(mut self, order: TableOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets the database charset override.
    #[must_use]
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Sets the database collation override.
    #[must_use]
    pub fn collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }
}

/// Statements generated for one schema, grouped by kind.
///
/// Statements carry no trailing `;`. Comment-only statements (starting with
/// `--`) are placeholders for operations the engine does not need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSchema {
    /// Schema name.
    pub schema_name: String,
    /// Target engine.
    pub database_type: DatabaseType,
    /// Emission order used.
    pub order: TableOrder,
    /// `CREATE DATABASE`.
    pub database: Vec<String>,
    /// `CREATE TABLE`, one per table.
    pub tables: Vec<String>,
    /// Standalone `CREATE INDEX`.
    pub indexes: Vec<String>,
    /// `ALTER TABLE ... ADD CONSTRAINT` for engines without inline keys.
    pub foreign_keys: Vec<String>,
    /// `COMMENT ON` statements.
    pub comments: Vec<String>,
    /// `CREATE SEQUENCE`.
    pub sequences: Vec<String>,
    /// Statements binding SEQUENCE key defaults; always last.
    pub sequence_defaults: Vec<String>,
    /// Schema problems tolerated by lenient resolution.
    pub warnings: Vec<SchemaError>,
}

impl CompiledSchema {
    fn sections(&self) -> Vec<(&'static str, &[String])> {
        let mut sections = vec![("Database", self.database.as_slice())];
        if self.order == TableOrder::Dependency {
            sections.push(("Sequences", self.sequences.as_slice()));
        }
        sections.push(("Tables", self.tables.as_slice()));
        sections.push(("Indexes", self.indexes.as_slice()));
        sections.push(("Foreign keys", self.foreign_keys.as_slice()));
        sections.push(("Comments", self.comments.as_slice()));
        if self.order == TableOrder::Declaration {
            sections.push(("Sequences", self.sequences.as_slice()));
        }
        sections.push(("Sequence defaults", self.sequence_defaults.as_slice()));
        sections
    }

    /// Every statement in execution order.
    #[must_use]
    pub fn statements(&self) -> Vec<&str> {
        self.sections()
            .into_iter()
            .flat_map(|(_, statements)| statements.iter().map(String::as_str))
            .collect()
    }

    /// Number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections().iter().map(|(_, s)| s.len()).sum()
    }

    /// Returns true when nothing was generated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders the script: one `-- <section>` header per non-empty group,
    /// each statement terminated by `;`.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let blocks: Vec<String> = self
            .sections()
            .into_iter()
            .filter(|(_, statements)| !statements.is_empty())
            .map(|(title, statements)| {
                let mut block = format!("-- {title}\n");
                for statement in statements {
                    block.push_str(&terminate(statement));
                    block.push('\n');
                }
                block
            })
            .collect();
        blocks.join("\n")
    }
}

/// Appends `;` unless the statement is a comment.
fn terminate(statement: &str) -> String {
    if statement.trim_start().starts_with("--") {
        statement.to_string()
    } else {
        format!("{statement};")
    }
}

/// Generates DDL for one engine.
#[derive(Debug, Clone)]
pub struct DdlAssembler {
    dialect: &'static dyn Dialect,
    options: CompileOptions,
}

impl DdlAssembler {
    /// Creates an assembler with default options.
    #[must_use]
    pub fn new(database_type: DatabaseType) -> Self {
        Self {
            dialect: database_type.dialect(),
            options: CompileOptions::default(),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the dialect in use.
    #[must_use]
    pub fn dialect(&self) -> &'static dyn Dialect {
        self.dialect
    }

    /// Returns the options.
    #[must_use]
    pub const fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Resolves `schema` and generates its creation script.
    ///
    /// # Errors
    ///
    /// Fails on schema problems in strict mode and on field types the
    /// dialect cannot express.
    pub fn compile(&self, schema: &Schema) -> Result<CompiledSchema> {
        let resolution = InheritanceResolver::new(self.options.mode).resolve(schema.clone())?;
        let schema = &resolution.schema;
        let dialect = self.dialect;
        info!(
            schema = %schema.name,
            dialect = dialect.database_type_name(),
            tables = schema.tables.len(),
            "Compiling schema"
        );

        let charset = self
            .options
            .charset
            .as_deref()
            .unwrap_or(&schema.charset);
        let collation = self
            .options
            .collation
            .as_deref()
            .unwrap_or(&schema.collation);
        let database = vec![dialect.create_database_sql(
            &schema.name,
            non_empty(charset),
            non_empty(collation),
        )];

        let mut compiled = CompiledSchema {
            schema_name: schema.name.clone(),
            database_type: dialect.database_type(),
            order: self.options.order,
            database,
            tables: Vec::with_capacity(schema.tables.len()),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
            comments: Vec::new(),
            sequences: Vec::new(),
            sequence_defaults: Vec::new(),
            warnings: Vec::new(),
        };
        let mut seen_sequences = HashSet::new();

        for table in self.ordered(schema) {
            debug!(table = %table.name, "Generating table");
            compiled.tables.push(dialect.create_table_sql(table, schema)?);

            if !dialect.supports_inline_indexes() {
                compiled.indexes.extend(
                    table
                        .indexes
                        .iter()
                        .map(|index| dialect.create_index_sql(&table.name, index)),
                );
            }
            if !dialect.supports_inline_foreign_keys() {
                compiled.foreign_keys.extend(
                    table
                        .relations
                        .iter()
                        .map(|relation| dialect.add_foreign_key_sql(&table.name, relation)),
                );
            }
            compiled.comments.extend(dialect.comment_statements(table));

            for field in table.fields.iter().filter(|f| f.is_sequence()) {
                let name = sequence_name(&field.name);
                if seen_sequences.insert(name.clone()) {
                    compiled.sequences.push(dialect.create_sequence_sql(&name));
                }
                compiled
                    .sequence_defaults
                    .extend(dialect.sequence_default_sql(&table.name, field));
            }
        }

        compiled.warnings = resolution.warnings;
        info!(
            schema = %compiled.schema_name,
            statements = compiled.len(),
            warnings = compiled.warnings.len(),
            "Schema compiled"
        );
        Ok(compiled)
    }

    /// Resolves `schema` and generates the script that removes it: tables in
    /// reverse creation order, then sequences, then the database.
    ///
    /// # Errors
    ///
    /// Fails on schema problems in strict mode.
    pub fn teardown(&self, schema: &Schema) -> Result<Vec<String>> {
        let resolution = InheritanceResolver::new(self.options.mode).resolve(schema.clone())?;
        let schema = &resolution.schema;
        let dialect = self.dialect;
        info!(
            schema = %schema.name,
            dialect = dialect.database_type_name(),
            "Generating teardown"
        );

        let tables = self.ordered(schema);
        let mut statements: Vec<String> = tables
            .iter()
            .rev()
            .map(|table| dialect.drop_table_sql(&table.name))
            .collect();

        let mut seen_sequences = HashSet::new();
        for table in &tables {
            for field in table.fields.iter().filter(|f| f.is_sequence()) {
                let name = sequence_name(&field.name);
                if seen_sequences.insert(name.clone()) {
                    statements.push(dialect.drop_sequence_sql(&name));
                }
            }
        }

        statements.push(dialect.drop_database_sql(&schema.name));
        Ok(statements)
    }

    /// [`Self::teardown`] rendered as a script, one `;`-terminated statement
    /// per line.
    ///
    /// # Errors
    ///
    /// Fails on schema problems in strict mode.
    pub fn teardown_sql(&self, schema: &Schema) -> Result<String> {
        Ok(self
            .teardown(schema)?
            .iter()
            .map(String::as_str)
            .map(terminate)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn ordered<'a>(&self, schema: &'a Schema) -> Vec<&'a Table> {
        match self.options.order {
            TableOrder::Declaration => schema.tables.iter().collect(),
            TableOrder::Dependency => dependency_order(&schema.tables),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.trim().is_empty())
}

/// Topologically sorts tables so referenced tables come first.
///
/// Kahn's algorithm over foreign-key references; among ready tables the
/// earliest declared goes next. Self references and references to tables
/// outside the schema are ignored. Tables left on a cycle are appended in
/// declaration order.
fn dependency_order(tables: &[Table]) -> Vec<&Table> {
    let index: HashMap<&str, usize> = tables
        .iter()
        .enumerate()
        .map(|(i, t)| (t.name.as_str(), i))
        .collect();

    let mut in_degree = vec![0_usize; tables.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); tables.len()];
    for (i, table) in tables.iter().enumerate() {
        let parents: BTreeSet<usize> = table
            .relations
            .iter()
            .filter_map(|r| index.get(r.reference_table.as_str()).copied())
            .filter(|&p| p != i)
            .collect();
        in_degree[i] = parents.len();
        for parent in parents {
            dependents[parent].push(i);
        }
    }

    let mut ready: BTreeSet<usize> = (0..tables.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut emitted = vec![false; tables.len()];
    let mut result = Vec::with_capacity(tables.len());

    while let Some(i) = ready.pop_first() {
        emitted[i] = true;
        result.push(&tables[i]);
        for &child in &dependents[i] {
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                ready.insert(child);
            }
        }
    }

    if result.len() < tables.len() {
        debug!(
            remaining = tables.len() - result.len(),
            "Foreign-key cycle, keeping declaration order for the rest"
        );
        result.extend(
            tables
                .iter()
                .enumerate()
                .filter(|(i, _)| !emitted[*i])
                .map(|(_, t)| t),
        );
    }
    result
}

/// Compiles `schema` for `database_type` with default options and returns
/// the script.
///
/// # Errors
///
/// Fails when a field type is not supported by the dialect.
pub fn compile_schema(schema: &Schema, database_type: DatabaseType) -> Result<String> {
    Ok(DdlAssembler::new(database_type).compile(schema)?.to_sql())
}

/// Renders the teardown script for `schema` with default options.
///
/// # Errors
///
/// Never fails with default options; the signature matches
/// [`compile_schema`].
pub fn compile_teardown(schema: &Schema, database_type: DatabaseType) -> Result<String> {
    DdlAssembler::new(database_type).teardown_sql(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, FieldType, Index, PrimaryKeyKind, Relation, RelationAction};

    fn shop() -> Schema {
        Schema::new("shop")
            .table(
                Table::new("orders")
                    .field(
                        Field::new("id", FieldType::Long)
                            .not_null()
                            .primary_key(PrimaryKeyKind::AutoIncrement),
                    )
                    .field(Field::new("user_id", FieldType::Long).not_null())
                    .index(Index::new("idx_orders_user").columns(&["user_id"]))
                    .relation(
                        Relation::new("user_id", "users", "id")
                            .name("fk_orders_user")
                            .on_delete(RelationAction::Cascade),
                    ),
            )
            .table(
                Table::new("users").field(
                    Field::new("id", FieldType::Long)
                        .not_null()
                        .primary_key(PrimaryKeyKind::AutoIncrement),
                ),
            )
    }

    fn names<'a>(tables: &[&'a Table]) -> Vec<&'a str> {
        tables.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_declaration_order_is_default() {
        let compiled = DdlAssembler::new(DatabaseType::Mysql)
            .compile(&shop())
            .unwrap();
        assert_eq!(compiled.tables.len(), 2);
        assert!(compiled.tables[0].contains("`orders`"));
        assert!(compiled.tables[1].contains("`users`"));
        assert!(compiled.indexes.is_empty());
        assert!(compiled.foreign_keys.is_empty());
    }

    #[test]
    fn test_dependency_order_puts_referenced_tables_first() {
        let schema = shop();
        assert_eq!(names(&dependency_order(&schema.tables)), ["users", "orders"]);
    }

    #[test]
    fn test_dependency_cycle_falls_back_to_declaration_order() {
        let tables = vec![
            Table::new("solo"),
            Table::new("a").relation(Relation::new("b_id", "b", "id")),
            Table::new("b").relation(Relation::new("a_id", "a", "id")),
            Table::new("me").relation(Relation::new("parent_id", "me", "id")),
        ];
        assert_eq!(names(&dependency_order(&tables)), ["solo", "me", "a", "b"]);
    }

    #[test]
    fn test_non_embedding_dialect_emits_standalone_statements() {
        let compiled = DdlAssembler::new(DatabaseType::H2)
            .compile(&shop())
            .unwrap();
        assert_eq!(
            compiled.indexes,
            ["CREATE INDEX IF NOT EXISTS `idx_orders_user` ON `orders` (`user_id` ASC)"]
        );
        assert_eq!(compiled.foreign_keys.len(), 1);
        assert!(compiled.foreign_keys[0].starts_with("ALTER TABLE `orders` ADD CONSTRAINT"));
    }

    #[test]
    fn test_sequences_are_deduplicated_and_placed_by_order() {
        let seq_id = || {
            Field::new("id", FieldType::Long)
                .not_null()
                .primary_key(PrimaryKeyKind::Sequence)
        };
        let schema = Schema::new("s")
            .table(Table::new("a").field(seq_id()))
            .table(Table::new("b").field(seq_id()));

        let compiled = DdlAssembler::new(DatabaseType::Postgresql)
            .compile(&schema)
            .unwrap();
        assert_eq!(compiled.sequences, ["CREATE SEQUENCE \"seq_id\" START 1 INCREMENT 1"]);
        assert_eq!(compiled.sequence_defaults.len(), 2);
        let statements = compiled.statements();
        assert!(statements[statements.len() - 3].starts_with("CREATE SEQUENCE"));

        let compiled = DdlAssembler::new(DatabaseType::Postgresql)
            .with_options(CompileOptions::new().order(TableOrder::Dependency))
            .compile(&schema)
            .unwrap();
        assert!(compiled.statements()[1].starts_with("CREATE SEQUENCE"));
    }

    #[test]
    fn test_sequence_is_created_before_it_is_referenced() {
        let schema = Schema::new("ledger").table(
            Table::new("entries").field(
                Field::new("EntryNo", FieldType::Long)
                    .not_null()
                    .primary_key(PrimaryKeyKind::Sequence),
            ),
        );

        for database_type in [DatabaseType::Postgresql, DatabaseType::Oracle] {
            for order in [TableOrder::Declaration, TableOrder::Dependency] {
                let compiled = DdlAssembler::new(database_type)
                    .with_options(CompileOptions::new().order(order))
                    .compile(&schema)
                    .unwrap();
                let statements = compiled.statements();
                let created = statements
                    .iter()
                    .position(|s| s.starts_with("CREATE SEQUENCE"))
                    .unwrap();
                for (i, statement) in statements.iter().enumerate() {
                    if statement.contains("seq_EntryNo") && i != created {
                        assert!(i > created, "{database_type}: {statement}");
                    }
                }
                assert!(compiled.tables[0].contains("EntryNo"));
                assert!(!compiled.tables[0].contains("seq_EntryNo"));
                assert_eq!(compiled.sequence_defaults.len(), 1);
            }
        }
    }

    #[test]
    fn test_duplicate_table_is_created_once() {
        let schema = Schema::new("s")
            .table(Table::new("p").field(Field::new("first", FieldType::Integer)))
            .table(Table::new("p").field(Field::new("second", FieldType::Integer)));

        let compiled = DdlAssembler::new(DatabaseType::Sqlserver)
            .compile(&schema)
            .unwrap();
        assert_eq!(
            compiled.warnings,
            vec![SchemaError::DuplicateTable("p".to_string())]
        );
        assert_eq!(compiled.tables.len(), 1);
        assert!(compiled.tables[0].contains("[first]"));
        assert!(!compiled.tables[0].contains("[second]"));
    }

    #[test]
    fn test_to_sql_sections_and_terminators() {
        let compiled = DdlAssembler::new(DatabaseType::H2)
            .compile(&shop())
            .unwrap();
        let sql = compiled.to_sql();
        assert!(sql.starts_with("-- Database\n-- H2 creates the database automatically: shop\n"));
        assert!(sql.contains("\n-- Tables\nCREATE TABLE IF NOT EXISTS `orders`"));
        assert!(sql.contains("\n-- Indexes\n"));
        assert!(sql.contains("\n-- Foreign keys\n"));
        assert!(!sql.contains("-- Comments"));
        assert!(sql.contains("ON DELETE CASCADE;\n"));
    }

    #[test]
    fn test_database_overrides() {
        let compiled = DdlAssembler::new(DatabaseType::Mysql)
            .with_options(CompileOptions::new().charset("latin1").collation("latin1_swedish_ci"))
            .compile(&Schema::new("shop"))
            .unwrap();
        assert_eq!(
            compiled.database,
            ["CREATE DATABASE IF NOT EXISTS `shop` DEFAULT CHARACTER SET latin1 DEFAULT COLLATE latin1_swedish_ci"]
        );
    }

    #[test]
    fn test_strict_mode_propagates_schema_errors() {
        let schema = Schema::new("s").table(Table::new("a").extends("missing"));
        let err = DdlAssembler::new(DatabaseType::Mysql)
            .with_options(CompileOptions::new().mode(ResolveMode::Strict))
            .compile(&schema)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Schema(SchemaError::MissingParent { .. })
        ));

        let compiled = DdlAssembler::new(DatabaseType::Mysql).compile(&schema).unwrap();
        assert_eq!(compiled.warnings.len(), 1);
    }

    #[test]
    fn test_teardown_reverses_tables() {
        let statements = DdlAssembler::new(DatabaseType::Mysql)
            .with_options(CompileOptions::new().order(TableOrder::Dependency))
            .teardown(&shop())
            .unwrap();
        assert_eq!(
            statements,
            [
                "DROP TABLE IF EXISTS `orders`",
                "DROP TABLE IF EXISTS `users`",
                "DROP DATABASE IF EXISTS `shop`",
            ]
        );
    }

    #[test]
    fn test_compile_teardown_drops_sequences_after_tables() {
        let schema = Schema::new("s").table(
            Table::new("t")
                .field(Field::new("id", FieldType::Long).primary_key(PrimaryKeyKind::Sequence)),
        );
        assert_eq!(
            compile_teardown(&schema, DatabaseType::Oracle).unwrap(),
            "DROP TABLE [t];\nDROP SEQUENCE [seq_id];\nDROP USER [s] CASCADE;"
        );
    }
}
