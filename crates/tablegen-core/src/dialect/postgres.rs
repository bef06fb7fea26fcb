//! PostgreSQL dialect.

use super::{
    comment_on_statements, decimal_parts, is_mysql_collation, length_or, sequence_name,
    DatabaseType, Dialect,
};
use crate::error::DialectError;
use crate::schema::{Field, FieldType, Index, IndexKind, Table};

/// PostgreSQL dialect.
///
/// Auto-increment keys become `SERIAL` types, sequence keys get a
/// `nextval(...)` default once their sequence exists, and comments are
/// separate `COMMENT ON` statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Maps MySQL-style charset names to PostgreSQL encodings.
    fn encoding(charset: &str) -> String {
        match charset.to_ascii_lowercase().as_str() {
            "utf8" | "utf8mb3" | "utf8mb4" => "UTF8".to_string(),
            "latin1" => "LATIN1".to_string(),
            "ascii" => "SQL_ASCII".to_string(),
            _ => charset.to_string(),
        }
    }
}

impl Dialect for PostgresDialect {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::Postgresql
    }

    fn database_type_name(&self) -> &'static str {
        "PostgreSQL"
    }

    fn identifier_quote(&self) -> &'static str {
        "\""
    }

    fn supports_if_not_exists(&self) -> bool {
        true
    }

    fn auto_increment_keyword(&self) -> &'static str {
        ""
    }

    fn create_database_sql(
        &self,
        name: &str,
        charset: Option<&str>,
        collation: Option<&str>,
    ) -> String {
        let mut sql = format!("CREATE DATABASE {}", self.escape_identifier(name));
        if let Some(charset) = charset.filter(|c| !c.is_empty()) {
            sql.push_str(&format!(" WITH ENCODING '{}'", Self::encoding(charset)));
        }
        if let Some(collation) = collation.filter(|c| !c.is_empty() && !is_mysql_collation(c)) {
            sql.push_str(&format!(" LC_COLLATE '{collation}'"));
        }
        sql
    }

    fn field_type(&self, field: &Field) -> Result<String, DialectError> {
        let serial = field.is_auto_increment();
        Ok(match &field.field_type {
            FieldType::Integer | FieldType::Int => {
                String::from(if serial { "SERIAL" } else { "INTEGER" })
            }
            FieldType::Long | FieldType::BigInt => {
                String::from(if serial { "BIGSERIAL" } else { "BIGINT" })
            }
            FieldType::TinyInt | FieldType::SmallInt => {
                String::from(if serial { "SMALLSERIAL" } else { "SMALLINT" })
            }
            FieldType::Decimal | FieldType::Numeric | FieldType::Number => {
                let (precision, scale) = decimal_parts(field);
                format!("NUMERIC({precision},{scale})")
            }
            FieldType::Float => "REAL".to_string(),
            FieldType::Double => "DOUBLE PRECISION".to_string(),
            FieldType::Boolean | FieldType::Bool => "BOOLEAN".to_string(),
            FieldType::Char => format!("CHAR({})", length_or(field, 1)),
            FieldType::String | FieldType::Varchar | FieldType::Varchar2 => {
                format!("VARCHAR({})", length_or(field, 255))
            }
            FieldType::Text
            | FieldType::LongText
            | FieldType::MediumText
            | FieldType::TinyText
            | FieldType::Clob => "TEXT".to_string(),
            FieldType::Binary
            | FieldType::Blob
            | FieldType::LongBlob
            | FieldType::MediumBlob
            | FieldType::TinyBlob
            | FieldType::Bytea => "BYTEA".to_string(),
            FieldType::DateTime | FieldType::Timestamp => "TIMESTAMP".to_string(),
            FieldType::Date => "DATE".to_string(),
            FieldType::Time => "TIME".to_string(),
            FieldType::Json => "JSONB".to_string(),
            FieldType::Year | FieldType::Unrecognized(_) => return Err(self.unsupported(field)),
        })
    }

    /// `<name> <type> [NOT NULL] [DEFAULT v] [UNIQUE]`
    fn field_definition(&self, field: &Field) -> Result<String, DialectError> {
        let mut sql = format!(
            "{} {}",
            self.escape_identifier(&field.name),
            self.field_type(field)?
        );
        if !field.nullable {
            sql.push_str(" NOT NULL");
        }
        if !field.is_sequence() {
            if let Some(default) = self.default_clause(field) {
                sql.push_str(&default);
            }
        }
        if field.unique && !field.is_primary_key() {
            sql.push_str(" UNIQUE");
        }
        Ok(sql)
    }

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
        sql.push_str(&format!(
            "ON {} USING {} ({})",
            self.escape_identifier(table_name),
            index.method.as_sql(),
            self.index_columns(index)
        ));
        sql
    }

    fn comment_statements(&self, table: &Table) -> Vec<String> {
        comment_on_statements(self, table)
    }

    fn table_exists_sql(&self, table_name: &str) -> String {
        format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = 'public' AND table_name = {}",
            self.escape_string_value(table_name)
        )
    }

    fn describe_table_sql(&self, table_name: &str) -> String {
        format!(
            "SELECT column_name, data_type, is_nullable, column_default FROM information_schema.columns WHERE table_name = {} ORDER BY ordinal_position",
            self.escape_string_value(table_name)
        )
    }

    fn limit_sql(&self, base_sql: &str, offset: u64, limit: u64) -> String {
        format!("{base_sql} LIMIT {limit} OFFSET {offset}")
    }

    fn create_sequence_sql(&self, name: &str) -> String {
        format!(
            "CREATE SEQUENCE {} START 1 INCREMENT 1",
            self.escape_identifier(name)
        )
    }

    fn sequence_default_sql(&self, table_name: &str, field: &Field) -> Option<String> {
        let sequence = self.escape_identifier(&sequence_name(&field.name));
        Some(format!(
            "ALTER TABLE {} ALTER COLUMN {} SET DEFAULT nextval({})",
            self.escape_identifier(table_name),
            self.escape_identifier(&field.name),
            self.escape_string_value(&sequence)
        ))
    }

    fn drop_sequence_sql(&self, name: &str) -> String {
        format!("DROP SEQUENCE IF EXISTS {}", self.escape_identifier(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{IndexColumn, IndexMethod, PrimaryKeyKind, Schema};

    #[test]
    fn test_serial_types_for_auto_increment() {
        let d = PostgresDialect::new();
        let id = Field::new("id", FieldType::Long).primary_key(PrimaryKeyKind::AutoIncrement);
        assert_eq!(d.field_type(&id).unwrap(), "BIGSERIAL");
        let id = Field::new("id", FieldType::Integer).primary_key(PrimaryKeyKind::AutoIncrement);
        assert_eq!(d.field_type(&id).unwrap(), "SERIAL");
        let plain = Field::new("n", FieldType::Long);
        assert_eq!(d.field_type(&plain).unwrap(), "BIGINT");
    }

    #[test]
    fn test_field_definition_has_no_auto_increment_keyword() {
        let id = Field::new("id", FieldType::Long)
            .not_null()
            .primary_key(PrimaryKeyKind::AutoIncrement)
            .comment("ignored inline");
        assert_eq!(
            PostgresDialect.field_definition(&id).unwrap(),
            "\"id\" BIGSERIAL NOT NULL"
        );
    }

    #[test]
    fn test_sequence_key_default_is_bound_separately() {
        let field = Field::new("EntryNo", FieldType::Long)
            .not_null()
            .primary_key(PrimaryKeyKind::Sequence)
            .default_value("42");
        assert_eq!(
            PostgresDialect.field_definition(&field).unwrap(),
            "\"EntryNo\" BIGINT NOT NULL"
        );
        assert_eq!(
            PostgresDialect.sequence_default_sql("ledger", &field).unwrap(),
            "ALTER TABLE \"ledger\" ALTER COLUMN \"EntryNo\" SET DEFAULT nextval('\"seq_EntryNo\"')"
        );
    }

    #[test]
    fn test_type_mapping() {
        let d = PostgresDialect;
        assert_eq!(
            d.field_type(&Field::new("a", FieldType::Json)).unwrap(),
            "JSONB"
        );
        assert_eq!(
            d.field_type(&Field::new("a", FieldType::Decimal).precision(12, 4))
                .unwrap(),
            "NUMERIC(12,4)"
        );
        assert_eq!(
            d.field_type(&Field::new("a", FieldType::Blob)).unwrap(),
            "BYTEA"
        );
        assert_eq!(
            d.field_type(&Field::new("a", FieldType::Double)).unwrap(),
            "DOUBLE PRECISION"
        );
    }

    #[test]
    fn test_create_database_maps_charset_and_skips_mysql_collation() {
        assert_eq!(
            PostgresDialect.create_database_sql("shop", Some("utf8mb4"), Some("utf8mb4_unicode_ci")),
            "CREATE DATABASE \"shop\" WITH ENCODING 'UTF8'"
        );
        assert_eq!(
            PostgresDialect.create_database_sql("shop", None, Some("en_US.UTF-8")),
            "CREATE DATABASE \"shop\" LC_COLLATE 'en_US.UTF-8'"
        );
    }

    #[test]
    fn test_create_index_uses_method() {
        let index = Index::new("idx_email")
            .kind(IndexKind::Unique)
            .method(IndexMethod::Hash)
            .column(IndexColumn::new("email").length(8));
        assert_eq!(
            PostgresDialect.create_index_sql("users", &index),
            "CREATE UNIQUE INDEX \"idx_email\" ON \"users\" USING HASH (\"email\" ASC)"
        );
    }

    #[test]
    fn test_comment_statements() {
        let table = Table::new("users")
            .comment("App users")
            .field(Field::new("id", FieldType::Long))
            .field(Field::new("email", FieldType::String).comment("Login"));
        assert_eq!(
            PostgresDialect.comment_statements(&table),
            vec![
                "COMMENT ON TABLE \"users\" IS 'App users'".to_string(),
                "COMMENT ON COLUMN \"users\".\"email\" IS 'Login'".to_string(),
            ]
        );
    }

    #[test]
    fn test_create_table_has_no_options() {
        let table = Table::new("t")
            .comment("ignored")
            .field(Field::new("a", FieldType::Integer));
        let sql = PostgresDialect
            .create_table_sql(&table, &Schema::new("s"))
            .unwrap();
        assert!(sql.ends_with("\n)"));
    }

    #[test]
    fn test_limit_and_sequences() {
        let d = PostgresDialect;
        assert_eq!(d.limit_sql("SELECT 1", 0, 10), "SELECT 1 LIMIT 10 OFFSET 0");
        assert_eq!(
            d.create_sequence_sql("seq_id"),
            "CREATE SEQUENCE \"seq_id\" START 1 INCREMENT 1"
        );
        assert_eq!(
            d.drop_sequence_sql("seq_id"),
            "DROP SEQUENCE IF EXISTS \"seq_id\""
        );
    }
}
