//! Schema model.
//!
//! Plain value types describing a database: its tables, their fields,
//! indexes and relations. Every type derives `serde` with camelCase keys so
//! schema documents deserialize directly into this model, defaults included.
//!
//! The model is built once per compile request, rewritten by the
//! [`InheritanceResolver`](crate::resolver::InheritanceResolver), and then
//! read by the dialects.

mod field;
mod index;
mod relation;
mod table;

pub use field::{Field, FieldType, PrimaryKeyKind};
pub use index::{Index, IndexColumn, IndexKind, IndexMethod, SortOrder};
pub use relation::{Relation, RelationAction, RelationKind};
pub use table::Table;

use serde::{Deserialize, Serialize};

/// Default character set for a schema.
pub const DEFAULT_CHARSET: &str = "utf8mb4";
/// Default collation for a schema.
pub const DEFAULT_COLLATION: &str = "utf8mb4_unicode_ci";
/// Default MySQL storage engine.
pub const DEFAULT_ENGINE: &str = "InnoDB";

fn default_charset() -> String {
    DEFAULT_CHARSET.to_string()
}

fn default_collation() -> String {
    DEFAULT_COLLATION.to_string()
}

fn default_engine() -> String {
    DEFAULT_ENGINE.to_string()
}

/// A database schema: the unit of compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Database name.
    pub name: String,
    /// Free-form version label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Default character set.
    #[serde(default = "default_charset")]
    pub charset: String,
    /// Default collation.
    #[serde(default = "default_collation")]
    pub collation: String,
    /// Default storage engine.
    #[serde(default = "default_engine")]
    pub engine: String,
    /// Schema comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Tables, in declaration order.
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Schema {
    /// Creates an empty schema with the default charset, collation and engine.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            charset: default_charset(),
            collation: default_collation(),
            engine: default_engine(),
            comment: None,
            tables: Vec::new(),
        }
    }

    /// Sets the version label.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the default charset.
    #[must_use]
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    /// Sets the default collation.
    #[must_use]
    pub fn collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = collation.into();
        self
    }

    /// Sets the default engine.
    #[must_use]
    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Adds a table.
    #[must_use]
    pub fn table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Gets the first table with the given name.
    #[must_use]
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Returns table names in declaration order.
    #[must_use]
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}
