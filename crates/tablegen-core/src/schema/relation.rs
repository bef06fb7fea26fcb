//! Foreign-key relations between tables.

use serde::{Deserialize, Serialize};

/// Referential action for ON DELETE / ON UPDATE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationAction {
    /// Cascade the change to referencing rows.
    Cascade,
    /// Set the referencing column to NULL.
    SetNull,
    /// Reject the change (checked immediately).
    #[default]
    Restrict,
    /// Reject the change (checked at statement end).
    NoAction,
}

impl RelationAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
        }
    }
}

/// Cardinality of a relation. Informational only; it does not change the DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    OneToOne,
    OneToMany,
    #[default]
    ManyToOne,
    ManyToMany,
}

/// A foreign key from a local column to a column of another table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    /// Constraint name. Empty means an anonymous constraint.
    #[serde(default)]
    pub name: String,
    /// Local column.
    pub column: String,
    /// Referenced table.
    pub reference_table: String,
    /// Referenced column.
    pub reference_column: String,
    /// Action on delete.
    #[serde(default)]
    pub on_delete: RelationAction,
    /// Action on update.
    #[serde(default)]
    pub on_update: RelationAction,
    /// Cardinality.
    #[serde(rename = "type", default)]
    pub kind: RelationKind,
    /// Comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Relation {
    /// Creates an anonymous many-to-one relation with RESTRICT actions.
    #[must_use]
    pub fn new(
        column: impl Into<String>,
        reference_table: impl Into<String>,
        reference_column: impl Into<String>,
    ) -> Self {
        Self {
            name: String::new(),
            column: column.into(),
            reference_table: reference_table.into(),
            reference_column: reference_column.into(),
            on_delete: RelationAction::Restrict,
            on_update: RelationAction::Restrict,
            kind: RelationKind::ManyToOne,
            comment: None,
        }
    }

    /// Sets the constraint name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the ON DELETE action.
    #[must_use]
    pub const fn on_delete(mut self, action: RelationAction) -> Self {
        self.on_delete = action;
        self
    }

    /// Sets the ON UPDATE action.
    #[must_use]
    pub const fn on_update(mut self, action: RelationAction) -> Self {
        self.on_update = action;
        self
    }

    /// Sets the cardinality.
    #[must_use]
    pub const fn kind(mut self, kind: RelationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Key used when merging inherited relations; anonymous relations are
    /// keyed by their local column.
    #[must_use]
    pub fn merge_key(&self) -> String {
        if self.name.is_empty() {
            format!("({})", self.column)
        } else {
            self.name.clone()
        }
    }
}
