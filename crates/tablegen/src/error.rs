//! Error types for the command-line front end.

use std::path::PathBuf;

/// Errors raised while loading, compiling, saving or applying a schema.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Schema resolution or DDL generation failed.
    #[error(transparent)]
    Compile(#[from] tablegen_core::Error),

    /// The schema document is not valid JSON for the schema model.
    #[error("Failed to parse schema '{source_name}': {source}")]
    Parse {
        /// File name or `<stdin>`.
        source_name: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse config '{path}': {source}")]
    Config {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// No dialect was given on the command line, in the environment or in
    /// the configuration file.
    #[error("No dialect selected; pass --dialect or set TABLEGEN_DIALECT")]
    MissingDialect,

    /// `apply` was called without a database URL.
    #[error("No database URL; pass --database-url or set DATABASE_URL")]
    MissingDatabaseUrl,

    /// A statement failed against the live database.
    #[error("Statement {index} failed: {source}\n{statement}")]
    Statement {
        /// 1-based position of the statement in the script.
        index: usize,
        /// The failing statement.
        statement: String,
        /// Driver error.
        source: sqlx::Error,
    },

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error (reading schemas, writing scripts).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tablegen_core::DialectError> for CliError {
    fn from(err: tablegen_core::DialectError) -> Self {
        Self::Compile(err.into())
    }
}

/// Result type for the command-line front end.
pub type Result<T> = std::result::Result<T, CliError>;
