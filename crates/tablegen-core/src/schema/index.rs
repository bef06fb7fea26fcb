//! Index definitions.

use serde::{Deserialize, Serialize};

/// Kind of index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndexKind {
    /// Plain secondary index.
    #[default]
    Normal,
    /// Unique index.
    Unique,
    /// Full-text index (MySQL).
    Fulltext,
    /// Spatial index.
    Spatial,
}

impl IndexKind {
    /// Returns the keyword placed before `INDEX`/`KEY`, if any.
    #[must_use]
    pub const fn prefix(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Unique => Some("UNIQUE"),
            Self::Fulltext => Some("FULLTEXT"),
            Self::Spatial => Some("SPATIAL"),
        }
    }
}

/// Index access method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndexMethod {
    /// B-tree.
    #[default]
    Btree,
    /// Hash.
    Hash,
}

impl IndexMethod {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Btree => "BTREE",
            Self::Hash => "HASH",
        }
    }
}

/// Sort order of an index column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A column taking part in an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexColumn {
    /// Column name.
    pub name: String,
    /// Prefix length for prefix indexes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Sort order.
    #[serde(default)]
    pub order: SortOrder,
    /// Comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl IndexColumn {
    /// Creates an ascending index column.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            length: None,
            order: SortOrder::Asc,
            comment: None,
        }
    }

    /// Sets a prefix length.
    #[must_use]
    pub const fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Sorts the column descending.
    #[must_use]
    pub const fn desc(mut self) -> Self {
        self.order = SortOrder::Desc;
        self
    }
}

/// An index on a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    /// Index name. May be empty in loosely written documents.
    #[serde(default)]
    pub name: String,
    /// Index kind.
    #[serde(rename = "type", default)]
    pub kind: IndexKind,
    /// Access method.
    #[serde(default)]
    pub method: IndexMethod,
    /// Comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Indexed columns, in order.
    #[serde(default)]
    pub columns: Vec<IndexColumn>,
}

impl Index {
    /// Creates a normal B-tree index with no columns.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: IndexKind::Normal,
            method: IndexMethod::Btree,
            comment: None,
            columns: Vec::new(),
        }
    }

    /// Sets the kind.
    #[must_use]
    pub const fn kind(mut self, kind: IndexKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the access method.
    #[must_use]
    pub const fn method(mut self, method: IndexMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Adds a column.
    #[must_use]
    pub fn column(mut self, column: IndexColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds ascending columns by name.
    #[must_use]
    pub fn columns(mut self, names: &[&str]) -> Self {
        self.columns
            .extend(names.iter().map(|name| IndexColumn::new(*name)));
        self
    }

    /// Key used when merging inherited indexes.
    ///
    /// Unnamed indexes are keyed by their column list.
    #[must_use]
    pub fn merge_key(&self) -> String {
        if self.name.is_empty() {
            let cols: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
            format!("({})", cols.join(","))
        } else {
            self.name.clone()
        }
    }
}
