//! H2 dialect.

use super::{decimal_parts, length_or, DatabaseType, Dialect};
use crate::error::DialectError;
use crate::schema::{Field, FieldType, Index, IndexKind, IndexMethod, Schema, Table};

/// H2 dialect.
///
/// H2 databases are files, so database statements are comments. Indexes and
/// foreign keys are emitted as separate statements after the tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct H2Dialect;

impl H2Dialect {
    /// Creates a new H2 dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for H2Dialect {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::H2
    }

    fn database_type_name(&self) -> &'static str {
        "H2"
    }

    fn identifier_quote(&self) -> &'static str {
        "`"
    }

    fn supports_if_not_exists(&self) -> bool {
        true
    }

    fn auto_increment_keyword(&self) -> &'static str {
        "AUTO_INCREMENT"
    }

    fn supports_inline_foreign_keys(&self) -> bool {
        false
    }

    fn create_database_sql(
        &self,
        name: &str,
        _charset: Option<&str>,
        _collation: Option<&str>,
    ) -> String {
        format!("-- H2 creates the database automatically: {name}")
    }

    fn drop_database_sql(&self, name: &str) -> String {
        format!("-- H2 databases are dropped by deleting their files: {name}")
    }

    fn field_type(&self, field: &Field) -> Result<String, DialectError> {
        Ok(match &field.field_type {
            FieldType::Integer | FieldType::Int => "INT".to_string(),
            FieldType::Long | FieldType::BigInt => "BIGINT".to_string(),
            FieldType::TinyInt => "TINYINT".to_string(),
            FieldType::SmallInt => "SMALLINT".to_string(),
            FieldType::Decimal | FieldType::Numeric | FieldType::Number => {
                let (precision, scale) = decimal_parts(field);
                format!("DECIMAL({precision},{scale})")
            }
            FieldType::Float => "REAL".to_string(),
            FieldType::Double => "DOUBLE".to_string(),
            FieldType::Boolean | FieldType::Bool => "BOOLEAN".to_string(),
            FieldType::Char => format!("CHAR({})", length_or(field, 1)),
            FieldType::String | FieldType::Varchar | FieldType::Varchar2 => {
                format!("VARCHAR({})", length_or(field, 255))
            }
            FieldType::Text
            | FieldType::LongText
            | FieldType::MediumText
            | FieldType::TinyText
            | FieldType::Clob
            | FieldType::Json => "CLOB".to_string(),
            FieldType::Binary => format!("VARBINARY({})", length_or(field, 255)),
            FieldType::Blob
            | FieldType::LongBlob
            | FieldType::MediumBlob
            | FieldType::TinyBlob
            | FieldType::Bytea => "BLOB".to_string(),
            FieldType::DateTime | FieldType::Timestamp => "TIMESTAMP".to_string(),
            FieldType::Date => "DATE".to_string(),
            FieldType::Time => "TIME".to_string(),
            FieldType::Year | FieldType::Unrecognized(_) => return Err(self.unsupported(field)),
        })
    }

    /// `<name> <type> [AUTO_INCREMENT] [NOT NULL] [DEFAULT v] [UNIQUE] [COMMENT 'c']`
    fn field_definition(&self, field: &Field) -> Result<String, DialectError> {
        let mut sql = format!(
            "{} {}",
            self.escape_identifier(&field.name),
            self.field_type(field)?
        );
        if field.is_auto_increment() {
            sql.push(' ');
            sql.push_str(self.auto_increment_keyword());
        }
        if !field.nullable {
            sql.push_str(" NOT NULL");
        }
        if let Some(default) = self.default_clause(field) {
            sql.push_str(&default);
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

    fn create_index_sql(&self, table_name: &str, index: &Index) -> String {
        let mut sql = String::from("CREATE ");
        match index.kind {
            IndexKind::Unique => sql.push_str("UNIQUE "),
            IndexKind::Spatial => sql.push_str("SPATIAL "),
            IndexKind::Normal | IndexKind::Fulltext => {}
        }
        if index.method == IndexMethod::Hash {
            sql.push_str("HASH ");
        }
        sql.push_str("INDEX ");
        if let Some(name) = self.standalone_index_name(table_name, index) {
            sql.push_str("IF NOT EXISTS ");
            sql.push_str(&self.escape_identifier(&name));
            sql.push(' ');
        }
        sql.push_str(&format!(
            "ON {} ({})",
            self.escape_identifier(table_name),
            self.index_columns(index)
        ));
        sql
    }

    fn table_options(&self, table: &Table, _schema: &Schema) -> String {
        table
            .comment_text()
            .map(|c| format!(" COMMENT {}", self.escape_string_value(c)))
            .unwrap_or_default()
    }

    fn table_exists_sql(&self, table_name: &str) -> String {
        format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = {}",
            self.escape_string_value(&table_name.to_uppercase())
        )
    }

    fn describe_table_sql(&self, table_name: &str) -> String {
        format!(
            "SELECT column_name, data_type, is_nullable, column_default FROM information_schema.columns WHERE table_name = {} ORDER BY ordinal_position",
            self.escape_string_value(&table_name.to_uppercase())
        )
    }

    fn create_sequence_sql(&self, name: &str) -> String {
        format!(
            "CREATE SEQUENCE IF NOT EXISTS {} START WITH 1 INCREMENT BY 1",
            self.escape_identifier(name)
        )
    }

    fn drop_sequence_sql(&self, name: &str) -> String {
        format!("DROP SEQUENCE IF EXISTS {}", self.escape_identifier(name))
    }
}
