//! Oracle dialect.
//!
//! Identifiers are quoted with brackets, as the generated scripts always
//! have been. Foreign keys support only `ON DELETE CASCADE` and
//! `ON DELETE SET NULL`.

use super::{
    comment_on_statements, decimal_parts, length_or, sequence_name, DatabaseType, Dialect,
};
use tracing::warn;

use crate::error::DialectError;
use crate::schema::{Field, FieldType, Relation, RelationAction, Table};

const MAX_VARCHAR2: u32 = 4000;
const MAX_RAW: u32 = 2000;

/// Oracle dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleDialect;

impl OracleDialect {
    /// Creates a new Oracle dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for OracleDialect {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::Oracle
    }

    fn database_type_name(&self) -> &'static str {
        "Oracle"
    }

    fn identifier_quote(&self) -> &'static str {
        "["
    }

    fn closing_quote(&self) -> &'static str {
        "]"
    }

    fn supports_if_not_exists(&self) -> bool {
        false
    }

    fn requires_index_name(&self) -> bool {
        true
    }

    fn auto_increment_keyword(&self) -> &'static str {
        ""
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    fn create_database_sql(
        &self,
        name: &str,
        _charset: Option<&str>,
        _collation: Option<&str>,
    ) -> String {
        format!("-- Oracle schemas are created with the owning user: {name}")
    }

    fn drop_database_sql(&self, name: &str) -> String {
        format!("DROP USER {} CASCADE", self.escape_identifier(name))
    }

    fn field_type(&self, field: &Field) -> Result<String, DialectError> {
        Ok(match &field.field_type {
            FieldType::Integer | FieldType::Int => "NUMBER(10)".to_string(),
            FieldType::Long | FieldType::BigInt => "NUMBER(19)".to_string(),
            FieldType::TinyInt => "NUMBER(3)".to_string(),
            FieldType::SmallInt => "NUMBER(5)".to_string(),
            FieldType::Decimal | FieldType::Numeric | FieldType::Number => {
                let (precision, scale) = decimal_parts(field);
                format!("NUMBER({precision},{scale})")
            }
            FieldType::Float => "BINARY_FLOAT".to_string(),
            FieldType::Double => "BINARY_DOUBLE".to_string(),
            FieldType::Boolean | FieldType::Bool => "NUMBER(1)".to_string(),
            FieldType::Char => format!("CHAR({})", length_or(field, 1)),
            FieldType::String | FieldType::Varchar | FieldType::Varchar2 => {
                let length = length_or(field, 255);
                if length > MAX_VARCHAR2 {
                    "CLOB".to_string()
                } else {
                    format!("VARCHAR2({length})")
                }
            }
            FieldType::Text
            | FieldType::LongText
            | FieldType::MediumText
            | FieldType::TinyText
            | FieldType::Clob
            | FieldType::Json => "CLOB".to_string(),
            FieldType::Binary => {
                let length = length_or(field, 255);
                if length > MAX_RAW {
                    "BLOB".to_string()
                } else {
                    format!("RAW({length})")
                }
            }
            FieldType::Blob
            | FieldType::LongBlob
            | FieldType::MediumBlob
            | FieldType::TinyBlob
            | FieldType::Bytea => "BLOB".to_string(),
            FieldType::DateTime | FieldType::Timestamp | FieldType::Time => {
                "TIMESTAMP".to_string()
            }
            FieldType::Date => "DATE".to_string(),
            FieldType::Year | FieldType::Unrecognized(_) => return Err(self.unsupported(field)),
        })
    }

    /// `<name> <type> [DEFAULT v] [NOT NULL] [UNIQUE]`
    ///
    /// Sequence keys get their default from [`Dialect::sequence_default_sql`]
    /// once the sequence exists.
    fn field_definition(&self, field: &Field) -> Result<String, DialectError> {
        let mut sql = format!(
            "{} {}",
            self.escape_identifier(&field.name),
            self.field_type(field)?
        );
        if field.is_auto_increment() {
            warn!(
                field = %field.name,
                "Oracle has no auto-increment keyword; use a SEQUENCE key to generate values"
            );
        }
        if !field.is_sequence() {
            if let Some(default) = self.default_clause(field) {
                sql.push_str(&default);
            }
        }
        if !field.nullable {
            sql.push_str(" NOT NULL");
        }
        if field.unique && !field.is_primary_key() {
            sql.push_str(" UNIQUE");
        }
        Ok(sql)
    }

    fn relation_action_sql(&self, action: RelationAction) -> Option<&'static str> {
        match action {
            RelationAction::Cascade | RelationAction::SetNull => Some(action.as_sql()),
            RelationAction::Restrict | RelationAction::NoAction => None,
        }
    }

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
        // No ON UPDATE in Oracle.
        if let Some(action) = self.relation_action_sql(relation.on_delete) {
            sql.push_str(" ON DELETE ");
            sql.push_str(action);
        }
        sql
    }

    fn comment_statements(&self, table: &Table) -> Vec<String> {
        comment_on_statements(self, table)
    }

    fn table_exists_sql(&self, table_name: &str) -> String {
        format!(
            "SELECT COUNT(*) FROM user_tables WHERE table_name = {}",
            self.escape_string_value(&table_name.to_uppercase())
        )
    }

    fn describe_table_sql(&self, table_name: &str) -> String {
        format!(
            "SELECT column_name, data_type, nullable, data_default FROM user_tab_columns WHERE table_name = {} ORDER BY column_id",
            self.escape_string_value(&table_name.to_uppercase())
        )
    }

    fn limit_sql(&self, base_sql: &str, offset: u64, limit: u64) -> String {
        format!("{base_sql} OFFSET {offset} ROWS FETCH NEXT {limit} ROWS ONLY")
    }

    fn create_sequence_sql(&self, name: &str) -> String {
        format!(
            "CREATE SEQUENCE {} START WITH 1 INCREMENT BY 1",
            self.escape_identifier(name)
        )
    }

    fn sequence_default_sql(&self, table_name: &str, field: &Field) -> Option<String> {
        Some(format!(
            "ALTER TABLE {} MODIFY {} DEFAULT {}.NEXTVAL",
            self.escape_identifier(table_name),
            self.escape_identifier(&field.name),
            self.escape_identifier(&sequence_name(&field.name))
        ))
    }

    fn drop_sequence_sql(&self, name: &str) -> String {
        format!("DROP SEQUENCE {}", self.escape_identifier(name))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::schema::{PrimaryKeyKind, Schema};

    #[test]
    fn test_type_mapping() {
        let d = OracleDialect::new();
        let cases = [
            (Field::new("a", FieldType::Integer), "NUMBER(10)"),
            (Field::new("a", FieldType::Long), "NUMBER(19)"),
            (Field::new("a", FieldType::Decimal).precision(12, 2), "NUMBER(12,2)"),
            (Field::new("a", FieldType::Boolean), "NUMBER(1)"),
            (Field::new("a", FieldType::String), "VARCHAR2(255)"),
            (Field::new("a", FieldType::String).length(5000), "CLOB"),
            (Field::new("a", FieldType::Text), "CLOB"),
            (Field::new("a", FieldType::Binary), "RAW(255)"),
            (Field::new("a", FieldType::DateTime), "TIMESTAMP"),
            (Field::new("a", FieldType::Double), "BINARY_DOUBLE"),
        ];
        for (field, expected) in cases {
            assert_eq!(d.field_type(&field).unwrap(), expected);
        }
    }

    #[test]
    fn test_bracket_quoting() {
        assert_eq!(OracleDialect.escape_identifier("users"), "[users]");
    }

    #[test]
    fn test_sequence_key_default_is_bound_separately() {
        let field = Field::new("EntryNo", FieldType::Long)
            .not_null()
            .primary_key(PrimaryKeyKind::Sequence);
        assert_eq!(
            OracleDialect.field_definition(&field).unwrap(),
            "[EntryNo] NUMBER(19) NOT NULL"
        );
        assert_eq!(
            OracleDialect.sequence_default_sql("ledger", &field).unwrap(),
            "ALTER TABLE [ledger] MODIFY [EntryNo] DEFAULT [seq_EntryNo].NEXTVAL"
        );
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_auto_increment_key_logs_warning() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let field = Field::new("id", FieldType::Long)
            .not_null()
            .primary_key(PrimaryKeyKind::AutoIncrement);
        let sql = tracing::subscriber::with_default(subscriber, || {
            OracleDialect.field_definition(&field).unwrap()
        });

        assert_eq!(sql, "[id] NUMBER(19) NOT NULL");
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("no auto-increment keyword"));
    }

    #[test]
    fn test_foreign_key_drops_on_update() {
        let relation = Relation::new("user_id", "users", "id")
            .on_delete(RelationAction::SetNull)
            .on_update(RelationAction::Cascade);
        assert_eq!(
            OracleDialect.foreign_key_constraint(&relation),
            "FOREIGN KEY ([user_id]) REFERENCES [users]([id]) ON DELETE SET NULL"
        );
    }

    #[test]
    fn test_database_statements() {
        assert!(OracleDialect
            .create_database_sql("shop", None, None)
            .starts_with("-- "));
        assert_eq!(OracleDialect.drop_database_sql("shop"), "DROP USER [shop] CASCADE");
    }

    #[test]
    fn test_comments_and_create_table() {
        let table = Table::new("users")
            .comment("People")
            .field(Field::new("id", FieldType::Long).primary_key(PrimaryKeyKind::Single));
        let sql = OracleDialect
            .create_table_sql(&table, &Schema::new("s"))
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE [users] (\n    [id] NUMBER(19),\n    PRIMARY KEY ([id])\n)"
        );
        assert_eq!(
            OracleDialect.comment_statements(&table),
            vec!["COMMENT ON TABLE [users] IS 'People'".to_string()]
        );
    }

    #[test]
    fn test_limit_and_metadata() {
        assert_eq!(
            OracleDialect.limit_sql("SELECT * FROM t", 5, 10),
            "SELECT * FROM t OFFSET 5 ROWS FETCH NEXT 10 ROWS ONLY"
        );
        assert_eq!(
            OracleDialect.table_exists_sql("users"),
            "SELECT COUNT(*) FROM user_tables WHERE table_name = 'USERS'"
        );
    }
}
