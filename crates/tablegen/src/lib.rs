//! Command-line front end for `tablegen-core`.
//!
//! Reads JSON schema documents, compiles them for a chosen engine, saves the
//! scripts under an output directory and optionally runs them against a
//! live MySQL or PostgreSQL database.
//!
//! # CLI Usage
//!
//! ```bash
//! # Print and save the MySQL script for a schema
//! tablegen compile schema.json --dialect mysql
//!
//! # Show the schema after inheritance resolution
//! tablegen resolve schema.json
//!
//! # Print the script that drops everything again
//! tablegen teardown schema.json --dialect postgres
//!
//! # Run the script against a database
//! DATABASE_URL=postgres://localhost/shop tablegen apply schema.json --dialect postgres
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod source;
pub mod writer;

use std::path::Path;

use tablegen_core::{CompileOptions, CompiledSchema, DatabaseType, DdlAssembler, Schema};

pub use config::Config;
pub use error::{CliError, Result};
pub use executor::{apply, ApplyReport, DdlSink, DryRunSink, SqlxSink};
pub use source::{read_schema, JsonSchemaSource, SchemaSource};
pub use writer::SqlFileWriter;

/// Reads the schema at `path` (or stdin for `-`) and compiles it.
///
/// # Errors
///
/// Fails on unreadable or invalid documents and on compile errors.
pub fn compile_path(
    path: &Path,
    database_type: DatabaseType,
    options: CompileOptions,
) -> Result<CompiledSchema> {
    let schema = read_schema(&JsonSchemaSource, path)?;
    compile(&schema, database_type, options)
}

/// Compiles an already parsed schema. Lenient-mode warnings are kept on the
/// result; the resolver has already logged them.
///
/// # Errors
///
/// Fails on strict-mode schema problems and unsupported field types.
pub fn compile(
    schema: &Schema,
    database_type: DatabaseType,
    options: CompileOptions,
) -> Result<CompiledSchema> {
    Ok(DdlAssembler::new(database_type)
        .with_options(options)
        .compile(schema)?)
}
