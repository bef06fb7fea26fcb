//! Field (column) definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical field types.
///
/// The first block is the portable vocabulary every dialect maps. The second
/// block holds legacy spellings still found in older schema documents; each
/// dialect maps those too. Anything else is kept verbatim in
/// [`FieldType::Unrecognized`] and rejected at generation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    Long,
    /// Fixed-point decimal.
    Decimal,
    /// Boolean.
    Boolean,
    /// Fixed-length string.
    Char,
    /// Variable-length string.
    String,
    /// Unbounded text.
    Text,
    /// Variable-length binary.
    Binary,
    /// Binary large object.
    Blob,
    /// Date and time.
    DateTime,
    /// JSON document.
    Json,

    // Legacy aliases.
    Varchar,
    Varchar2,
    Numeric,
    Number,
    Float,
    Double,
    Int,
    BigInt,
    TinyInt,
    SmallInt,
    Bool,
    LongText,
    MediumText,
    TinyText,
    Clob,
    LongBlob,
    MediumBlob,
    TinyBlob,
    Bytea,
    Date,
    Time,
    Timestamp,
    Year,

    /// A type name no dialect knows.
    Unrecognized(String),
}

impl FieldType {
    /// Returns the canonical upper-case spelling.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Integer => "INTEGER",
            Self::Long => "LONG",
            Self::Decimal => "DECIMAL",
            Self::Boolean => "BOOLEAN",
            Self::Char => "CHAR",
            Self::String => "STRING",
            Self::Text => "TEXT",
            Self::Binary => "BINARY",
            Self::Blob => "BLOB",
            Self::DateTime => "DATETIME",
            Self::Json => "JSON",
            Self::Varchar => "VARCHAR",
            Self::Varchar2 => "VARCHAR2",
            Self::Numeric => "NUMERIC",
            Self::Number => "NUMBER",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Int => "INT",
            Self::BigInt => "BIGINT",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Bool => "BOOL",
            Self::LongText => "LONGTEXT",
            Self::MediumText => "MEDIUMTEXT",
            Self::TinyText => "TINYTEXT",
            Self::Clob => "CLOB",
            Self::LongBlob => "LONGBLOB",
            Self::MediumBlob => "MEDIUMBLOB",
            Self::TinyBlob => "TINYBLOB",
            Self::Bytea => "BYTEA",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Year => "YEAR",
            Self::Unrecognized(name) => name,
        }
    }

    /// Returns true for the integer family (used for auto-increment types).
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Integer | Self::Long | Self::Int | Self::BigInt | Self::TinyInt | Self::SmallInt
        )
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "INTEGER" => Self::Integer,
            "LONG" => Self::Long,
            "DECIMAL" => Self::Decimal,
            "BOOLEAN" => Self::Boolean,
            "CHAR" => Self::Char,
            "STRING" => Self::String,
            "TEXT" => Self::Text,
            "BINARY" => Self::Binary,
            "BLOB" => Self::Blob,
            "DATETIME" => Self::DateTime,
            "JSON" => Self::Json,
            "VARCHAR" => Self::Varchar,
            "VARCHAR2" => Self::Varchar2,
            "NUMERIC" => Self::Numeric,
            "NUMBER" => Self::Number,
            "FLOAT" => Self::Float,
            "DOUBLE" => Self::Double,
            "INT" => Self::Int,
            "BIGINT" => Self::BigInt,
            "TINYINT" => Self::TinyInt,
            "SMALLINT" => Self::SmallInt,
            "BOOL" => Self::Bool,
            "LONGTEXT" => Self::LongText,
            "MEDIUMTEXT" => Self::MediumText,
            "TINYTEXT" => Self::TinyText,
            "CLOB" => Self::Clob,
            "LONGBLOB" => Self::LongBlob,
            "MEDIUMBLOB" => Self::MediumBlob,
            "TINYBLOB" => Self::TinyBlob,
            "BYTEA" => Self::Bytea,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "TIMESTAMP" => Self::Timestamp,
            "YEAR" => Self::Year,
            _ => Self::Unrecognized(name),
        }
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Unrecognized(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a field takes part in the table's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimaryKeyKind {
    /// Not part of the primary key.
    #[default]
    None,
    /// Single-column primary key.
    Single,
    /// Member of a composite primary key.
    Composite,
    /// Engine-generated integer key.
    AutoIncrement,
    /// UUID key.
    Uuid,
    /// Key fed by a `seq_<field>` sequence.
    Sequence,
}

impl PrimaryKeyKind {
    /// Returns true when the field belongs to the primary key.
    #[must_use]
    pub const fn is_key(self) -> bool {
        !matches!(self, Self::None)
    }
}

const fn default_true() -> bool {
    true
}

/// A column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Column name.
    pub name: String,
    /// Logical type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Length for string/binary types, or precision fallback for decimals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Decimal precision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    /// Decimal scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    /// Whether NULL is allowed.
    #[serde(default = "default_true")]
    pub nullable: bool,
    /// Primary-key participation.
    #[serde(default)]
    pub primary_key: PrimaryKeyKind,
    /// Raw default value: a literal or a function name such as
    /// `CURRENT_TIMESTAMP`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Column comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Whether the column carries a UNIQUE constraint.
    #[serde(default)]
    pub unique: bool,
    /// Character set override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    /// Collation override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    /// Legacy encoding of an auto-increment key as a separate flag.
    ///
    /// Folded into [`PrimaryKeyKind::AutoIncrement`] during resolution.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub auto_increment: bool,
}

impl Field {
    /// Creates a nullable, non-key field.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: impl Into<FieldType>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            length: None,
            precision: None,
            scale: None,
            nullable: true,
            primary_key: PrimaryKeyKind::None,
            default_value: None,
            comment: None,
            unique: false,
            charset: None,
            collation: None,
            auto_increment: false,
        }
    }

    /// Sets the length.
    #[must_use]
    pub const fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets precision and scale.
    #[must_use]
    pub const fn precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Marks the field NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the primary-key kind.
    #[must_use]
    pub const fn primary_key(mut self, kind: PrimaryKeyKind) -> Self {
        self.primary_key = kind;
        self
    }

    /// Sets the raw default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Marks the field UNIQUE.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets the character set.
    #[must_use]
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Sets the collation.
    #[must_use]
    pub fn collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Sets the legacy auto-increment flag.
    #[must_use]
    pub const fn legacy_auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Returns true when the field belongs to the primary key.
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        self.primary_key.is_key()
    }

    /// Returns true for engine-generated integer keys.
    #[must_use]
    pub fn is_auto_increment(&self) -> bool {
        self.primary_key == PrimaryKeyKind::AutoIncrement
    }

    /// Returns true for sequence-backed keys.
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        self.primary_key == PrimaryKeyKind::Sequence
    }

    /// Returns the comment if it is non-blank.
    #[must_use]
    pub fn comment_text(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.trim().is_empty())
    }
}
