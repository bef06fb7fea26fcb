//! Error types for schema resolution and DDL generation.

/// Problems found in a schema description.
///
/// In lenient resolution these are collected as warnings and the schema is
/// still compiled; in strict resolution the first one aborts the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Two tables share a name.
    #[error("Duplicate table '{0}' in schema")]
    DuplicateTable(String),

    /// Two fields of one table share a name.
    #[error("Duplicate field '{field}' in table '{table}'")]
    DuplicateField {
        /// Table declaring the field twice.
        table: String,
        /// The repeated field name.
        field: String,
    },

    /// A table extends a table that is not part of the schema.
    #[error("Table '{table}' extends '{parent}' which doesn't exist")]
    MissingParent {
        /// The extending table.
        table: String,
        /// The parent name that could not be found.
        parent: String,
    },

    /// An `extends` chain loops back on itself.
    #[error("Circular inheritance detected at table '{table}': {}", .chain.join(" -> "))]
    CyclicInheritance {
        /// The table that reappeared in the chain.
        table: String,
        /// The chain walked so far, ending with the repeated table.
        chain: Vec<String>,
    },
}

/// Errors raised by a dialect while generating SQL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialectError {
    /// The requested database type is not one of the supported engines.
    #[error("Unsupported database type: {0}")]
    UnknownDialect(String),

    /// A field uses a logical type the dialect cannot express.
    #[error("{dialect} does not support field type '{field_type}' (field '{field}')")]
    UnsupportedType {
        /// Human-readable dialect name.
        dialect: &'static str,
        /// The offending logical type, as written in the schema.
        field_type: String,
        /// The field carrying the type.
        field: String,
    },
}

/// Top-level error for a compile call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Schema problem escalated by strict resolution.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The chosen dialect cannot generate the requested SQL.
    #[error(transparent)]
    Dialect(#[from] DialectError),
}

/// Result type for schema compilation.
pub type Result<T> = std::result::Result<T, Error>;
