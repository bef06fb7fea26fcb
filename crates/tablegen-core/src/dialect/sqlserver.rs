//! SQL Server dialect.

use super::{decimal_parts, is_mysql_collation, length_or, DatabaseType, Dialect};
use crate::error::DialectError;
use crate::schema::{Field, FieldType};

/// Largest length accepted by `VARCHAR(n)` / `VARBINARY(n)`.
const MAX_INLINE_LENGTH: u32 = 8000;

/// Microsoft SQL Server dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerDialect;

impl SqlServerDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn sized(name: &str, length: u32) -> String {
        if length > MAX_INLINE_LENGTH {
            format!("{name}(MAX)")
        } else {
            format!("{name}({length})")
        }
    }
}

impl Dialect for SqlServerDialect {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::Sqlserver
    }

    fn database_type_name(&self) -> &'static str {
        "SQL Server"
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
        "IDENTITY(1,1)"
    }

    fn current_timestamp_function(&self) -> &'static str {
        "GETDATE()"
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
        collation: Option<&str>,
    ) -> String {
        let mut sql = format!("CREATE DATABASE {}", self.escape_identifier(name));
        if let Some(collation) = collation.filter(|c| !c.is_empty() && !is_mysql_collation(c)) {
            sql.push_str(" COLLATE ");
            sql.push_str(collation);
        }
        sql
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
            FieldType::Float => "FLOAT".to_string(),
            FieldType::Double => "FLOAT(53)".to_string(),
            FieldType::Boolean | FieldType::Bool => "BIT".to_string(),
            FieldType::Char => format!("CHAR({})", length_or(field, 1)),
            FieldType::String | FieldType::Varchar | FieldType::Varchar2 => {
                Self::sized("VARCHAR", length_or(field, 255))
            }
            FieldType::Text
            | FieldType::LongText
            | FieldType::MediumText
            | FieldType::Clob
            | FieldType::Json => "NVARCHAR(MAX)".to_string(),
            FieldType::TinyText => "NVARCHAR(255)".to_string(),
            FieldType::Binary => Self::sized("VARBINARY", length_or(field, 255)),
            FieldType::TinyBlob => "VARBINARY(255)".to_string(),
            FieldType::Blob | FieldType::LongBlob | FieldType::MediumBlob | FieldType::Bytea => {
                "VARBINARY(MAX)".to_string()
            }
            FieldType::DateTime | FieldType::Timestamp => "DATETIME2".to_string(),
            FieldType::Date => "DATE".to_string(),
            FieldType::Time => "TIME".to_string(),
            FieldType::Year | FieldType::Unrecognized(_) => return Err(self.unsupported(field)),
        })
    }

    /// `<name> <type> [IDENTITY(1,1)] [NOT NULL] [DEFAULT v] [UNIQUE]`
    ///
    /// Identity columns cannot carry a default, so it is dropped for them.
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
        if !field.is_auto_increment() {
            if let Some(default) = self.default_clause(field) {
                sql.push_str(&default);
            }
        }
        if field.unique && !field.is_primary_key() {
            sql.push_str(" UNIQUE");
        }
        Ok(sql)
    }

    fn table_exists_sql(&self, table_name: &str) -> String {
        format!(
            "SELECT COUNT(*) FROM INFORMATION_SCHEMA.TABLES WHERE TABLE_NAME = {}",
            self.escape_string_value(table_name)
        )
    }

    fn describe_table_sql(&self, table_name: &str) -> String {
        format!(
            "SELECT COLUMN_NAME, DATA_TYPE, IS_NULLABLE, COLUMN_DEFAULT FROM INFORMATION_SCHEMA.COLUMNS WHERE TABLE_NAME = {} ORDER BY ORDINAL_POSITION",
            self.escape_string_value(table_name)
        )
    }

    /// `OFFSET ... FETCH NEXT ...` requires an ORDER BY; one is injected when
    /// the base query has none.
    fn limit_sql(&self, base_sql: &str, offset: u64, limit: u64) -> String {
        let mut sql = base_sql.to_string();
        if !base_sql.to_ascii_uppercase().contains("ORDER BY") {
            sql.push_str(" ORDER BY (SELECT NULL)");
        }
        sql.push_str(&format!(
            " OFFSET {offset} ROWS FETCH NEXT {limit} ROWS ONLY"
        ));
        sql
    }

    fn create_sequence_sql(&self, name: &str) -> String {
        format!(
            "CREATE SEQUENCE {} START WITH 1 INCREMENT BY 1",
            self.escape_identifier(name)
        )
    }

    fn drop_sequence_sql(&self, name: &str) -> String {
        format!("DROP SEQUENCE {}", self.escape_identifier(name))
    }
}
