//! Schema documents.

use std::io::Read;
use std::path::Path;

use tablegen_core::Schema;
use tracing::debug;

use crate::error::{CliError, Result};

/// Turns raw schema text into an unresolved [`Schema`].
pub trait SchemaSource {
    /// Parses one document. `source_name` only appears in error messages.
    ///
    /// # Errors
    ///
    /// Fails when the text is not a valid schema document.
    fn parse(&self, source_name: &str, raw: &str) -> Result<Schema>;
}

/// JSON schema documents in the camelCase shape of the schema model.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaSource;

impl JsonSchemaSource {
    /// Creates a JSON source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SchemaSource for JsonSchemaSource {
    fn parse(&self, source_name: &str, raw: &str) -> Result<Schema> {
        let schema: Schema = serde_json::from_str(raw).map_err(|source| CliError::Parse {
            source_name: source_name.to_string(),
            source,
        })?;
        debug!(
            source = source_name,
            schema = %schema.name,
            tables = schema.tables.len(),
            "Parsed schema"
        );
        Ok(schema)
    }
}

/// Reads a schema from `path`, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Fails on I/O errors and invalid documents.
pub fn read_schema(source: &dyn SchemaSource, path: &Path) -> Result<Schema> {
    if path.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        return source.parse("<stdin>", &raw);
    }
    let raw = std::fs::read_to_string(path)?;
    source.parse(&path.display().to_string(), &raw)
}
