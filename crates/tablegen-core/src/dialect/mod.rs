//! Dialect-specific DDL generation.
//!
//! Every supported engine implements [`Dialect`]. The trait carries the
//! shared statement templates as default methods; each engine overrides the
//! pieces where its syntax differs (quoting, type mapping, clause order,
//! table options, pagination).

mod h2;
mod mysql;
mod oracle;
mod postgres;
mod sqlserver;

pub use h2::H2Dialect;
pub use mysql::MySqlDialect;
pub use oracle::OracleDialect;
pub use postgres::PostgresDialect;
pub use sqlserver::SqlServerDialect;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DialectError;
use crate::schema::{
    Field, Index, IndexKind, IndexMethod, Relation, RelationAction, Schema, Table,
};

/// Supported database engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    /// H2 (embedded, file based).
    H2,
    /// MySQL / MariaDB.
    Mysql,
    /// PostgreSQL.
    Postgresql,
    /// Oracle.
    Oracle,
    /// Microsoft SQL Server.
    Sqlserver,
}

impl DatabaseType {
    /// All supported engines.
    pub const ALL: [Self; 5] = [
        Self::H2,
        Self::Mysql,
        Self::Postgresql,
        Self::Oracle,
        Self::Sqlserver,
    ];

    /// Returns the lower-case identifier used in file names and config.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::H2 => "h2",
            Self::Mysql => "mysql",
            Self::Postgresql => "postgresql",
            Self::Oracle => "oracle",
            Self::Sqlserver => "sqlserver",
        }
    }

    /// Returns the dialect for this engine.
    #[must_use]
    pub fn dialect(self) -> &'static dyn Dialect {
        dialect_for(self)
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseType {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h2" => Ok(Self::H2),
            "mysql" | "mariadb" => Ok(Self::Mysql),
            "postgresql" | "postgres" | "pg" => Ok(Self::Postgresql),
            "oracle" => Ok(Self::Oracle),
            "sqlserver" | "mssql" => Ok(Self::Sqlserver),
            _ => Err(DialectError::UnknownDialect(s.to_string())),
        }
    }
}

/// Returns the dialect implementation for an engine.
#[must_use]
pub fn dialect_for(database_type: DatabaseType) -> &'static dyn Dialect {
    match database_type {
        DatabaseType::H2 => &H2Dialect,
        DatabaseType::Mysql => &MySqlDialect,
        DatabaseType::Postgresql => &PostgresDialect,
        DatabaseType::Oracle => &OracleDialect,
        DatabaseType::Sqlserver => &SqlServerDialect,
    }
}

/// Name of the sequence backing a SEQUENCE primary-key field.
#[must_use]
pub fn sequence_name(field_name: &str) -> String {
    format!("seq_{field_name}")
}

/// Name for an unnamed index: `idx_<table>_<col1>_<col2>...`.
fn generated_index_name(table_name: &str, index: &Index) -> String {
    let mut name = format!("idx_{table_name}");
    for column in &index.columns {
        name.push('_');
        name.push_str(&column.name);
    }
    name
}

/// Returns true for plain numeric literals such as `0`, `-1` or `3.14`.
fn is_numeric_literal(value: &str) -> bool {
    let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
    let mut seen_digit = false;
    let mut seen_dot = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}

/// Returns true for collation names that only make sense on MySQL.
fn is_mysql_collation(collation: &str) -> bool {
    let lower = collation.to_ascii_lowercase();
    lower.starts_with("utf8") || lower.starts_with("latin1") || lower.starts_with("ascii")
}

/// `length` or a default.
fn length_or(field: &Field, default: u32) -> u32 {
    field.length.unwrap_or(default)
}

/// Precision and scale for decimal types: precision falls back to `length`
/// then 10, scale falls back to 0.
fn decimal_parts(field: &Field) -> (u32, u32) {
    let precision = field.precision.or(field.length).unwrap_or(10);
    let scale = field.scale.unwrap_or(0);
    (precision, scale)
}

/// `COMMENT ON TABLE` / `COMMENT ON COLUMN` statements for a table.
fn comment_on_statements<D: Dialect + ?Sized>(dialect: &D, table: &Table) -> Vec<String> {
    let table_name = dialect.escape_identifier(&table.name);
    let mut statements = Vec::new();
    if let Some(comment) = table.comment_text() {
        statements.push(format!(
            "COMMENT ON TABLE {table_name} IS {}",
            dialect.escape_string_value(comment)
        ));
    }
    for field in &table.fields {
        if let Some(comment) = field.comment_text() {
            statements.push(format!(
                "COMMENT ON COLUMN {table_name}.{} IS {}",
                dialect.escape_identifier(&field.name),
                dialect.escape_string_value(comment)
            ));
        }
    }
    statements
}

/// SQL generation for one database engine.
///
/// Implementations are stateless unit structs; every method is a pure
/// function of its arguments.
pub trait Dialect: Send + Sync + fmt::Debug {
    /// Engine this dialect generates SQL for.
    fn database_type(&self) -> DatabaseType;

    /// Human-readable engine name.
    fn database_type_name(&self) -> &'static str;

    /// Opening identifier quote.
    fn identifier_quote(&self) -> &'static str;

    /// Closing identifier quote.
    fn closing_quote(&self) -> &'static str {
        self.identifier_quote()
    }

    /// Whether `CREATE ... IF NOT EXISTS` / `DROP ... IF EXISTS` are accepted.
    fn supports_if_not_exists(&self) -> bool;

    /// Keyword attached to auto-increment columns. Empty when the engine
    /// expresses auto-increment through the type or a sequence.
    fn auto_increment_keyword(&self) -> &'static str;

    /// Function producing the current timestamp.
    fn current_timestamp_function(&self) -> &'static str {
        "CURRENT_TIMESTAMP"
    }

    /// Whether indexes are embedded in `CREATE TABLE`.
    fn supports_inline_indexes(&self) -> bool {
        false
    }

    /// Whether foreign keys are embedded in `CREATE TABLE`.
    fn supports_inline_foreign_keys(&self) -> bool {
        true
    }

    /// Whether index columns accept a prefix length.
    fn supports_prefix_index(&self) -> bool {
        false
    }

    /// Quotes an identifier, doubling any embedded closing quote.
    fn escape_identifier(&self, identifier: &str) -> String {
        if identifier.is_empty() {
            return String::new();
        }
        let close = self.closing_quote();
        format!(
            "{}{}{}",
            self.identifier_quote(),
            identifier.replace(close, &close.repeat(2)),
            close
        )
    }

    /// Quotes a string literal, doubling embedded single quotes.
    fn escape_string_value(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// `CREATE DATABASE` statement.
    fn create_database_sql(
        &self,
        name: &str,
        charset: Option<&str>,
        collation: Option<&str>,
    ) -> String;

    /// `DROP DATABASE` statement.
    fn drop_database_sql(&self, name: &str) -> String {
        let mut sql = String::from("DROP DATABASE ");
        if self.supports_if_not_exists() {
            sql.push_str("IF EXISTS ");
        }
        sql.push_str(&self.escape_identifier(name));
        sql
    }

    /// Maps a field's logical type to the native column type.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnsupportedType`] when the engine has no
    /// equivalent for the logical type.
    fn field_type(&self, field: &Field) -> Result<String, DialectError>;

    /// Error for a field whose type this dialect cannot express.
    fn unsupported(&self, field: &Field) -> DialectError {
        DialectError::UnsupportedType {
            dialect: self.database_type_name(),
            field_type: field.field_type.to_string(),
            field: field.name.clone(),
        }
    }

    /// Boolean literal used in defaults.
    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    /// Renders a raw default value.
    ///
    /// Timestamp functions map to [`Self::current_timestamp_function`],
    /// quoted literals pass through, `NULL`, booleans and numbers stay bare,
    /// and anything else becomes an escaped string literal.
    fn default_value_sql(&self, raw: &str) -> String {
        let value = raw.trim();
        if value.eq_ignore_ascii_case("CURRENT_TIMESTAMP") || value.eq_ignore_ascii_case("NOW()")
        {
            return self.current_timestamp_function().to_string();
        }
        if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
            return value.to_string();
        }
        if value.eq_ignore_ascii_case("NULL") {
            return "NULL".to_string();
        }
        if value.eq_ignore_ascii_case("TRUE") {
            return self.boolean_literal(true).to_string();
        }
        if value.eq_ignore_ascii_case("FALSE") {
            return self.boolean_literal(false).to_string();
        }
        if is_numeric_literal(value) {
            return value.to_string();
        }
        self.escape_string_value(value)
    }

    /// ` DEFAULT <value>` for fields with a non-blank default.
    fn default_clause(&self, field: &Field) -> Option<String> {
        field
            .default_value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .map(|v| format!(" DEFAULT {}", self.default_value_sql(v)))
    }

    /// Full column definition.
    ///
    /// The default order is
    /// `<name> <type> [NOT NULL] [DEFAULT v] [<autoinc>] [UNIQUE] [COMMENT 'c']`.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::field_type`] failures.
    fn field_definition(&self, field: &Field) -> Result<String, DialectError> {
        let mut sql = format!(
            "{} {}",
            self.escape_identifier(&field.name),
            self.field_type(field)?
        );
        if !field.nullable {
            sql.push_str(" NOT NULL");
        }
        if let Some(default) = self.default_clause(field) {
            sql.push_str(&default);
        }
        if field.is_auto_increment() && !self.auto_increment_keyword().is_empty() {
            sql.push(' ');
            sql.push_str(self.auto_increment_keyword());
        }
        if field.unique && !field.is_primary_key() {
            sql.push_str(" UNIQUE");
        }
        if let Some(comment) = field.comment_text() {
            sql.push_str(" COMMENT ");
            sql.push_str(&self.escape_string_value(comment));
        }
        Ok(sql)
    }

    /// `PRIMARY KEY (...)` over every key field in declaration order, or an
    /// empty string when the table has none.
    fn primary_key_clause(&self, fields: &[Field]) -> String {
        let columns: Vec<String> = fields
            .iter()
            .filter(|f| f.is_primary_key())
            .map(|f| self.escape_identifier(&f.name))
            .collect();
        if columns.is_empty() {
            return String::new();
        }
        format!("PRIMARY KEY ({})", columns.join(", "))
    }

    /// Column list of an index, without the surrounding parentheses.
    fn index_columns(&self, index: &Index) -> String {
        let columns: Vec<String> = index
            .columns
            .iter()
            .map(|column| {
                let mut def = self.escape_identifier(&column.name);
                if self.supports_prefix_index() {
                    if let Some(length) = column.length.filter(|l| *l > 0) {
                        def.push_str(&format!("({length})"));
                    }
                }
                def.push(' ');
                def.push_str(column.order.as_sql());
                def
            })
            .collect();
        columns.join(", ")
    }

    /// Whether standalone `CREATE INDEX` needs an index name.
    fn requires_index_name(&self) -> bool {
        false
    }

    /// Name used in a standalone `CREATE INDEX`. Unnamed indexes get a
    /// generated name when [`Self::requires_index_name`] is true.
    fn standalone_index_name(&self, table_name: &str, index: &Index) -> Option<String> {
        if !index.name.is_empty() {
            Some(index.name.clone())
        } else if self.requires_index_name() {
            Some(generated_index_name(table_name, index))
        } else {
            None
        }
    }

    /// Standalone `CREATE INDEX` statement.
    fn create_index_sql(&self, table_name: &str, index: &Index) -> String {
        let mut sql = String::from("CREATE ");
        if index.kind == IndexKind::Unique {
            sql.push_str("UNIQUE ");
        }
        sql.push_str("INDEX ");
        if let Some(name) = self.standalone_index_name(table_name, index) {
            sql.push_str(&self.escape_identifier(&name));
            sql.push(' ');
        }
        sql.push_str("ON ");
        sql.push_str(&self.escape_identifier(table_name));
        sql.push_str(" (");
        sql.push_str(&self.index_columns(index));
        sql.push(')');
        sql
    }

    /// Index clause embedded in `CREATE TABLE`; only used when
    /// [`Self::supports_inline_indexes`] is true.
    fn inline_index_clause(&self, index: &Index) -> String {
        let mut sql = String::new();
        if let Some(prefix) = index.kind.prefix() {
            sql.push_str(prefix);
            sql.push(' ');
        }
        sql.push_str("KEY ");
        if !index.name.is_empty() {
            sql.push_str(&self.escape_identifier(&index.name));
            sql.push(' ');
        }
        sql.push('(');
        sql.push_str(&self.index_columns(index));
        sql.push(')');
        if index.method == IndexMethod::Hash {
            sql.push_str(" USING HASH");
        }
        if let Some(comment) = index.comment.as_deref().filter(|c| !c.trim().is_empty()) {
            sql.push_str(" COMMENT ");
            sql.push_str(&self.escape_string_value(comment));
        }
        sql
    }

    /// SQL for a referential action, `None` when it is the engine default.
    fn relation_action_sql(&self, action: RelationAction) -> Option<&'static str> {
        match action {
            RelationAction::Restrict => None,
            other => Some(other.as_sql()),
        }
    }

    /// `[CONSTRAINT <name>] FOREIGN KEY (<col>) REFERENCES <table>(<col>) [ON ...]`.
    fn foreign_key_constraint(&self, relation: &Relation) -> String {
        let mut sql = String::new();
        if !relation.name.is_empty() {
            sql.push_str("CONSTRAINT ");
            sql.push_str(&self.escape_identifier(&relation.name));
            sql.push(' ');
        }
        sql.push_str(&format!(
            "FOREIGN KEY ({}) REFERENCES {}({})",
            self.escape_identifier(&relation.column),
            self.escape_identifier(&relation.reference_table),
            self.escape_identifier(&relation.reference_column)
        ));
        if let Some(action) = self.relation_action_sql(relation.on_delete) {
            sql.push_str(" ON DELETE ");
            sql.push_str(action);
        }
        if let Some(action) = self.relation_action_sql(relation.on_update) {
            sql.push_str(" ON UPDATE ");
            sql.push_str(action);
        }
        sql
    }

    /// `ALTER TABLE ... ADD <constraint>` for engines that do not embed
    /// foreign keys.
    fn add_foreign_key_sql(&self, table_name: &str, relation: &Relation) -> String {
        format!(
            "ALTER TABLE {} ADD {}",
            self.escape_identifier(table_name),
            self.foreign_key_constraint(relation)
        )
    }

    /// Text appended after the closing parenthesis of `CREATE TABLE`.
    fn table_options(&self, _table: &Table, _schema: &Schema) -> String {
        String::new()
    }

    /// Full `CREATE TABLE` statement for a resolved table.
    ///
    /// # Errors
    ///
    /// Fails when a field type cannot be mapped.
    fn create_table_sql(&self, table: &Table, schema: &Schema) -> Result<String, DialectError> {
        let mut sql = String::from("CREATE TABLE ");
        if self.supports_if_not_exists() {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&self.escape_identifier(&table.name));
        sql.push_str(" (\n");

        let mut parts = Vec::with_capacity(table.fields.len() + table.relations.len() + 1);
        for field in &table.fields {
            parts.push(self.field_definition(field)?);
        }

        let primary_key = self.primary_key_clause(&table.fields);
        if !primary_key.is_empty() {
            parts.push(primary_key);
        }

        if self.supports_inline_indexes() {
            parts.extend(table.indexes.iter().map(|i| self.inline_index_clause(i)));
        }

        if self.supports_inline_foreign_keys() {
            parts.extend(
                table
                    .relations
                    .iter()
                    .map(|r| self.foreign_key_constraint(r)),
            );
        }

        let body: Vec<String> = parts.iter().map(|p| format!("    {p}")).collect();
        sql.push_str(&body.join(",\n"));
        sql.push_str("\n)");
        sql.push_str(&self.table_options(table, schema));

        debug!(
            table = %table.name,
            dialect = self.database_type_name(),
            "Generated CREATE TABLE"
        );
        Ok(sql)
    }

    /// Comment statements for engines without inline COMMENT clauses.
    fn comment_statements(&self, _table: &Table) -> Vec<String> {
        Vec::new()
    }

    /// `DROP TABLE` statement.
    fn drop_table_sql(&self, table_name: &str) -> String {
        let mut sql = String::from("DROP TABLE ");
        if self.supports_if_not_exists() {
            sql.push_str("IF EXISTS ");
        }
        sql.push_str(&self.escape_identifier(table_name));
        sql
    }

    /// Query returning a non-zero count when the table exists.
    fn table_exists_sql(&self, table_name: &str) -> String {
        format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = {}",
            self.escape_string_value(table_name)
        )
    }

    /// Query describing a table's columns.
    fn describe_table_sql(&self, table_name: &str) -> String {
        format!("DESCRIBE {}", self.escape_identifier(table_name))
    }

    /// Wraps a query with pagination.
    fn limit_sql(&self, base_sql: &str, offset: u64, limit: u64) -> String {
        if offset > 0 {
            format!("{base_sql} LIMIT {limit} OFFSET {offset}")
        } else {
            format!("{base_sql} LIMIT {limit}")
        }
    }

    /// `CREATE SEQUENCE` statement, or a comment when sequences are not
    /// supported.
    fn create_sequence_sql(&self, name: &str) -> String {
        format!(
            "-- {} does not support sequences: {name}",
            self.database_type_name()
        )
    }

    /// Binds a SEQUENCE key's default to its sequence. Runs after
    /// `CREATE SEQUENCE`; `None` when the engine binds nothing.
    fn sequence_default_sql(&self, _table_name: &str, _field: &Field) -> Option<String> {
        None
    }

    /// `DROP SEQUENCE` statement, or a comment when sequences are not
    /// supported.
    fn drop_sequence_sql(&self, name: &str) -> String {
        format!(
            "-- {} does not support sequences: {name}",
            self.database_type_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldType, IndexColumn, PrimaryKeyKind};

    #[test]
    fn test_database_type_from_str() {
        assert_eq!("MySQL".parse::<DatabaseType>().unwrap(), DatabaseType::Mysql);
        assert_eq!(
            "postgres".parse::<DatabaseType>().unwrap(),
            DatabaseType::Postgresql
        );
        assert_eq!(
            "SQLSERVER".parse::<DatabaseType>().unwrap(),
            DatabaseType::Sqlserver
        );
        let err = "db2".parse::<DatabaseType>().unwrap_err();
        assert_eq!(err, DialectError::UnknownDialect("db2".to_string()));
        assert_eq!(err.to_string(), "Unsupported database type: db2");
    }

    #[test]
    fn test_registry_returns_matching_dialect() {
        for db in DatabaseType::ALL {
            assert_eq!(dialect_for(db).database_type(), db);
            assert_eq!(db.as_str().parse::<DatabaseType>().unwrap(), db);
        }
    }

    #[test]
    fn test_numeric_literal_detection() {
        assert!(is_numeric_literal("0"));
        assert!(is_numeric_literal("-12"));
        assert!(is_numeric_literal("3.14"));
        assert!(!is_numeric_literal("1.2.3"));
        assert!(!is_numeric_literal("abc"));
        assert!(!is_numeric_literal("-"));
        assert!(!is_numeric_literal(""));
    }

    #[test]
    fn test_default_value_rules() {
        let d = MySqlDialect;
        assert_eq!(d.default_value_sql("now()"), "CURRENT_TIMESTAMP");
        assert_eq!(d.default_value_sql("'x'"), "'x'");
        assert_eq!(d.default_value_sql("0"), "0");
        assert_eq!(d.default_value_sql("null"), "NULL");
        assert_eq!(d.default_value_sql("true"), "TRUE");
        assert_eq!(d.default_value_sql("O'Brien"), "'O''Brien'");
        assert_eq!(SqlServerDialect.default_value_sql("NOW()"), "GETDATE()");
        assert_eq!(SqlServerDialect.default_value_sql("FALSE"), "0");
    }

    #[test]
    fn test_blank_default_is_skipped() {
        let field = Field::new("a", FieldType::Integer).default_value("  ");
        assert_eq!(MySqlDialect.default_clause(&field), None);
    }

    #[test]
    fn test_escape_identifier_doubles_closing_quote() {
        assert_eq!(SqlServerDialect.escape_identifier("a]b"), "[a]]b]");
        assert_eq!(MySqlDialect.escape_identifier("a`b"), "`a``b`");
        assert_eq!(PostgresDialect.escape_identifier("a\"b"), "\"a\"\"b\"");
        assert_eq!(MySqlDialect.escape_identifier(""), "");
    }

    #[test]
    fn test_escape_string_value() {
        assert_eq!(MySqlDialect.escape_string_value("it's"), "'it''s'");
    }

    #[test]
    fn test_primary_key_clause_in_declaration_order() {
        let fields = vec![
            Field::new("tenant", FieldType::Long).primary_key(PrimaryKeyKind::Composite),
            Field::new("name", FieldType::String),
            Field::new("code", FieldType::String).primary_key(PrimaryKeyKind::Composite),
        ];
        assert_eq!(
            MySqlDialect.primary_key_clause(&fields),
            "PRIMARY KEY (`tenant`, `code`)"
        );
        assert_eq!(MySqlDialect.primary_key_clause(&fields[1..2]), "");
    }

    #[test]
    fn test_foreign_key_omits_restrict() {
        let relation = Relation::new("user_id", "users", "id").name("fk_user");
        assert_eq!(
            PostgresDialect.foreign_key_constraint(&relation),
            "CONSTRAINT \"fk_user\" FOREIGN KEY (\"user_id\") REFERENCES \"users\"(\"id\")"
        );
        let cascade = relation.on_delete(RelationAction::Cascade);
        assert!(PostgresDialect
            .foreign_key_constraint(&cascade)
            .ends_with("REFERENCES \"users\"(\"id\") ON DELETE CASCADE"));
    }

    #[test]
    fn test_anonymous_foreign_key_has_no_constraint_name() {
        let relation = Relation::new("a", "b", "c");
        assert_eq!(
            MySqlDialect.foreign_key_constraint(&relation),
            "FOREIGN KEY (`a`) REFERENCES `b`(`c`)"
        );
    }

    #[test]
    fn test_standalone_index_ignores_prefix_length_without_support() {
        let index = Index::new("idx_name")
            .kind(IndexKind::Unique)
            .column(IndexColumn::new("name").length(10).desc());
        assert_eq!(
            SqlServerDialect.create_index_sql("users", &index),
            "CREATE UNIQUE INDEX [idx_name] ON [users] ([name] DESC)"
        );
    }

    #[test]
    fn test_unnamed_index_gets_generated_name_where_required() {
        let index = Index::new("").columns(&["a", "b"]);
        assert_eq!(
            OracleDialect.create_index_sql("t", &index),
            "CREATE INDEX [idx_t_a_b] ON [t] ([a] ASC, [b] ASC)"
        );
        assert_eq!(
            SqlServerDialect.create_index_sql("t", &index),
            "CREATE INDEX [idx_t_a_b] ON [t] ([a] ASC, [b] ASC)"
        );
        assert_eq!(
            MySqlDialect.create_index_sql("t", &index),
            "CREATE INDEX `idx_t_a_b` ON `t` (`a` ASC, `b` ASC)"
        );
        assert_eq!(
            PostgresDialect.create_index_sql("t", &index),
            "CREATE INDEX ON \"t\" USING BTREE (\"a\" ASC, \"b\" ASC)"
        );
        let named = Index::new("idx_custom").columns(&["a"]);
        assert_eq!(
            OracleDialect.standalone_index_name("t", &named).as_deref(),
            Some("idx_custom")
        );
    }

    #[test]
    fn test_untrimmed_string_default_is_trimmed() {
        let field = Field::new("a", FieldType::String).default_value(" abc ");
        assert_eq!(
            MySqlDialect.field_definition(&field).unwrap(),
            "`a` VARCHAR(255) DEFAULT 'abc'"
        );
    }

    #[test]
    fn test_sequence_name() {
        assert_eq!(sequence_name("order_no"), "seq_order_no");
    }
}
