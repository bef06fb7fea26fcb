//! MySQL dialect.

use super::{decimal_parts, length_or, DatabaseType, Dialect};
use crate::error::DialectError;
use crate::schema::{
    Field, FieldType, Index, IndexMethod, Schema, Table, DEFAULT_CHARSET, DEFAULT_COLLATION,
    DEFAULT_ENGINE,
};

/// MySQL dialect.
///
/// Indexes are embedded in `CREATE TABLE` as `KEY` clauses and every table
/// carries engine, charset and collation options.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn with_length(name: &str, length: Option<u32>) -> String {
        match length {
            Some(n) => format!("{name}({n})"),
            None => name.to_string(),
        }
    }

    fn is_textual(field_type: &FieldType) -> bool {
        matches!(
            field_type,
            FieldType::Char
                | FieldType::String
                | FieldType::Varchar
                | FieldType::Varchar2
                | FieldType::Text
                | FieldType::LongText
                | FieldType::MediumText
                | FieldType::TinyText
                | FieldType::Clob
        )
    }
}

impl Dialect for MySqlDialect {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::Mysql
    }

    fn database_type_name(&self) -> &'static str {
        "MySQL"
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

    fn supports_inline_indexes(&self) -> bool {
        true
    }

    fn supports_prefix_index(&self) -> bool {
        true
    }

    fn create_database_sql(
        &self,
        name: &str,
        charset: Option<&str>,
        collation: Option<&str>,
    ) -> String {
        let mut sql = format!(
            "CREATE DATABASE IF NOT EXISTS {}",
            self.escape_identifier(name)
        );
        if let Some(charset) = charset.filter(|c| !c.is_empty()) {
            sql.push_str(" DEFAULT CHARACTER SET ");
            sql.push_str(charset);
        }
        if let Some(collation) = collation.filter(|c| !c.is_empty()) {
            sql.push_str(" DEFAULT COLLATE ");
            sql.push_str(collation);
        }
        sql
    }

    fn field_type(&self, field: &Field) -> Result<String, DialectError> {
        let mut sql = match &field.field_type {
            FieldType::Integer | FieldType::Int => Self::with_length("INT", field.length),
            FieldType::Long | FieldType::BigInt => Self::with_length("BIGINT", field.length),
            FieldType::SmallInt => Self::with_length("SMALLINT", field.length),
            FieldType::TinyInt => format!("TINYINT({})", length_or(field, 4)),
            FieldType::Decimal | FieldType::Numeric | FieldType::Number => {
                let (precision, scale) = decimal_parts(field);
                format!("DECIMAL({precision},{scale})")
            }
            FieldType::Float | FieldType::Double => {
                let name = if field.field_type == FieldType::Float {
                    "FLOAT"
                } else {
                    "DOUBLE"
                };
                match (field.length, field.scale) {
                    (Some(len), Some(scale)) => format!("{name}({len},{scale})"),
                    (Some(len), None) => format!("{name}({len})"),
                    _ => name.to_string(),
                }
            }
            FieldType::Boolean | FieldType::Bool => "TINYINT(1)".to_string(),
            FieldType::Char => format!("CHAR({})", length_or(field, 1)),
            FieldType::String | FieldType::Varchar | FieldType::Varchar2 => {
                format!("VARCHAR({})", length_or(field, 255))
            }
            FieldType::Text => "TEXT".to_string(),
            FieldType::LongText | FieldType::Clob => "LONGTEXT".to_string(),
            FieldType::MediumText => "MEDIUMTEXT".to_string(),
            FieldType::TinyText => "TINYTEXT".to_string(),
            FieldType::Binary => format!("VARBINARY({})", length_or(field, 255)),
            FieldType::Blob | FieldType::Bytea => "BLOB".to_string(),
            FieldType::LongBlob => "LONGBLOB".to_string(),
            FieldType::MediumBlob => "MEDIUMBLOB".to_string(),
            FieldType::TinyBlob => "TINYBLOB".to_string(),
            FieldType::DateTime => "DATETIME".to_string(),
            FieldType::Date => "DATE".to_string(),
            FieldType::Time => "TIME".to_string(),
            FieldType::Timestamp => "TIMESTAMP".to_string(),
            FieldType::Year => "YEAR".to_string(),
            FieldType::Json => "JSON".to_string(),
            FieldType::Unrecognized(_) => return Err(self.unsupported(field)),
        };

        if Self::is_textual(&field.field_type) {
            if let Some(charset) = field.charset.as_deref().filter(|c| !c.is_empty()) {
                sql.push_str(" CHARACTER SET ");
                sql.push_str(charset);
            }
            if let Some(collation) = field.collation.as_deref().filter(|c| !c.is_empty()) {
                sql.push_str(" COLLATE ");
                sql.push_str(collation);
            }
        }
        Ok(sql)
    }

    fn requires_index_name(&self) -> bool {
        true
    }

    fn create_index_sql(&self, table_name: &str, index: &Index) -> String {
        let mut sql = String::from("CREATE ");
        if let Some(prefix) = index.kind.prefix() {
            sql.push_str(prefix);
            sql.push(' ');
        }
        sql.push_str("INDEX ");
        if let Some(name) = self.standalone_index_name(table_name, index) {
            sql.push_str(&self.escape_identifier(&name));
            sql.push(' ');
        }
        sql.push_str(&format!(
            "ON {} ({})",
            self.escape_identifier(table_name),
            self.index_columns(index)
        ));
        if index.method == IndexMethod::Hash {
            sql.push_str(" USING HASH");
        }
        if let Some(comment) = index.comment.as_deref().filter(|c| !c.trim().is_empty()) {
            sql.push_str(" COMMENT ");
            sql.push_str(&self.escape_string_value(comment));
        }
        sql
    }

    fn table_options(&self, table: &Table, schema: &Schema) -> String {
        let engine = table
            .engine
            .as_deref()
            .filter(|e| !e.is_empty())
            .or_else(|| Some(schema.engine.as_str()).filter(|e| !e.is_empty()))
            .unwrap_or(DEFAULT_ENGINE);
        let charset = table
            .charset
            .as_deref()
            .filter(|c| !c.is_empty())
            .or_else(|| Some(schema.charset.as_str()).filter(|c| !c.is_empty()))
            .unwrap_or(DEFAULT_CHARSET);

        let mut options =
            format!(" ENGINE={engine} DEFAULT CHARSET={charset} COLLATE={DEFAULT_COLLATION}");
        if let Some(comment) = table.comment_text() {
            options.push_str(" COMMENT=");
            options.push_str(&self.escape_string_value(comment));
        }
        options
    }

    fn table_exists_sql(&self, table_name: &str) -> String {
        format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = DATABASE() AND table_name = {}",
            self.escape_string_value(table_name)
        )
    }

    fn limit_sql(&self, base_sql: &str, offset: u64, limit: u64) -> String {
        if offset > 0 {
            format!("{base_sql} LIMIT {offset}, {limit}")
        } else {
            format!("{base_sql} LIMIT {limit}")
        }
    }
}
