//! `tablegen.toml` configuration.
//!
//! Every value is optional; command-line flags and environment variables
//! take precedence over the file, and the file over built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tablegen_core::{CompileOptions, DatabaseType, ResolveMode, TableOrder};
use tracing::debug;

use crate::error::{CliError, Result};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "tablegen.toml";

/// Default directory for saved scripts.
pub const DEFAULT_OUTPUT_DIR: &str = "sqls";

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Compilation defaults.
    pub compile: CompileConfig,
    /// Where generated scripts go.
    pub output: OutputConfig,
    /// Target database.
    pub database: DatabaseConfig,
}

/// `[compile]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileConfig {
    /// Default dialect name, e.g. `mysql` or `postgres`.
    pub dialect: Option<String>,
    /// Resolve mode.
    pub mode: ResolveMode,
    /// Table order.
    pub order: TableOrder,
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory for saved scripts.
    pub dir: PathBuf,
    /// Whether compiled scripts are saved.
    pub save: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            save: true,
        }
    }
}

/// `[database]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection URL for `apply`.
    pub url: Option<String>,
    /// Charset for `CREATE DATABASE`, overriding the schema.
    pub charset: Option<String>,
    /// Collation for `CREATE DATABASE`, overriding the schema.
    pub collation: Option<String>,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not valid configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed input or unknown keys.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads `path` when given, otherwise `tablegen.toml` from `dir` when it
    /// exists, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Fails when an explicitly named file is missing or any file found is
    /// invalid.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            debug!(path = %path.display(), "Loading config");
            return Self::load(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "Loading config");
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Picks the dialect: the command-line value (already merged with the
    /// environment by the argument parser) wins over the file.
    ///
    /// # Errors
    ///
    /// Fails when no dialect is configured anywhere or the name is unknown.
    pub fn dialect(&self, cli: Option<&str>) -> Result<DatabaseType> {
        let name = cli
            .or(self.compile.dialect.as_deref())
            .ok_or(CliError::MissingDialect)?;
        Ok(name.parse()?)
    }

    /// Builds compile options, with command-line overrides applied.
    #[must_use]
    pub fn compile_options(
        &self,
        mode: Option<ResolveMode>,
        order: Option<TableOrder>,
    ) -> CompileOptions {
        CompileOptions {
            mode: mode.unwrap_or(self.compile.mode),
            order: order.unwrap_or(self.compile.order),
            charset: self.database.charset.clone(),
            collation: self.database.collation.clone(),
        }
    }

    /// Picks the database URL, command line first.
    ///
    /// # Errors
    ///
    /// Fails when no URL is configured anywhere.
    pub fn database_url(&self, cli: Option<&str>) -> Result<String> {
        cli.or(self.database.url.as_deref())
            .map(str::to_string)
            .ok_or(CliError::MissingDatabaseUrl)
    }

    /// Picks the output directory, command line first.
    #[must_use]
    pub fn output_dir(&self, cli: Option<&Path>) -> PathBuf {
        cli.map_or_else(|| self.output.dir.clone(), Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output.dir, PathBuf::from("sqls"));
        assert!(config.output.save);
        assert_eq!(config.compile.mode, ResolveMode::Lenient);
        assert_eq!(config.compile.order, TableOrder::Declaration);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_toml(
            r#"
            [compile]
            dialect = "postgres"
            mode = "strict"
            order = "dependency"

            [output]
            dir = "out/sql"
            save = false

            [database]
            url = "postgres://localhost/shop"
            charset = "latin1"
            "#,
        )
        .unwrap();
        assert_eq!(config.dialect(None).unwrap(), DatabaseType::Postgresql);
        assert_eq!(config.output.dir, PathBuf::from("out/sql"));
        assert!(!config.output.save);

        let options = config.compile_options(None, None);
        assert_eq!(options.mode, ResolveMode::Strict);
        assert_eq!(options.order, TableOrder::Dependency);
        assert_eq!(options.charset.as_deref(), Some("latin1"));
        assert_eq!(options.collation, None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml("[compile]\ndialect = \"h2\"\n").unwrap();
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.compile.mode, ResolveMode::Lenient);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(Config::from_toml("[compile]\ndialet = \"h2\"\n").is_err());
    }

    #[test]
    fn test_command_line_wins() {
        let config = Config::from_toml(
            "[compile]\ndialect = \"h2\"\nmode = \"strict\"\n[database]\nurl = \"mysql://file\"\n",
        )
        .unwrap();
        assert_eq!(config.dialect(Some("mssql")).unwrap(), DatabaseType::Sqlserver);
        assert_eq!(
            config.compile_options(Some(ResolveMode::Lenient), None).mode,
            ResolveMode::Lenient
        );
        assert_eq!(config.database_url(Some("mysql://flag")).unwrap(), "mysql://flag");
        assert_eq!(config.database_url(None).unwrap(), "mysql://file");
        assert_eq!(
            config.output_dir(Some(Path::new("elsewhere"))),
            PathBuf::from("elsewhere")
        );
    }

    #[test]
    fn test_missing_dialect_and_url() {
        let config = Config::default();
        assert!(matches!(config.dialect(None), Err(CliError::MissingDialect)));
        assert!(matches!(
            config.database_url(None),
            Err(CliError::MissingDatabaseUrl)
        ));
        assert!(matches!(
            config.dialect(Some("db2")),
            Err(CliError::Compile(tablegen_core::Error::Dialect(_)))
        ));
    }
}
