//! Saves generated scripts to disk.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tablegen_core::DatabaseType;
use tracing::info;

use crate::error::Result;

/// Writes scripts as `<dir>/<schema>_<dialect>_<yyyyMMdd_HHmmss>.sql`.
#[derive(Debug, Clone)]
pub struct SqlFileWriter {
    dir: PathBuf,
}

impl SqlFileWriter {
    /// Creates a writer for `dir`; the directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a script generated at `at`.
    #[must_use]
    pub fn file_name(schema: &str, database_type: DatabaseType, at: DateTime<Local>) -> String {
        format!(
            "{schema}_{database_type}_{}.sql",
            at.format("%Y%m%d_%H%M%S")
        )
    }

    /// Writes `sql` with a three-line header and returns the file path.
    ///
    /// # Errors
    ///
    /// Fails when the directory or file cannot be written.
    pub fn write(&self, schema: &str, database_type: DatabaseType, sql: &str) -> Result<PathBuf> {
        self.write_at(schema, database_type, sql, Local::now())
    }

    /// Like [`Self::write`] with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Fails when the directory or file cannot be written.
    pub fn write_at(
        &self,
        schema: &str,
        database_type: DatabaseType,
        sql: &str,
        at: DateTime<Local>,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(Self::file_name(schema, database_type, at));
        let content = format!(
            "-- Schema: {schema}\n-- Database type: {database_type}\n-- Generated at: {}\n\n{sql}",
            at.format("%Y-%m-%d %H:%M:%S")
        );
        std::fs::write(&path, content)?;
        info!(path = %path.display(), "Saved SQL script");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            SqlFileWriter::file_name("shop", DatabaseType::Postgresql, at()),
            "shop_postgresql_20240309_140507.sql"
        );
    }

    #[test]
    fn test_write_creates_directory_and_header() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = SqlFileWriter::new(tmp.path().join("sqls"));
        let path = writer
            .write_at("shop", DatabaseType::Mysql, "CREATE TABLE t (a INT);\n", at())
            .unwrap();

        assert_eq!(path, tmp.path().join("sqls/shop_mysql_20240309_140507.sql"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "-- Schema: shop\n-- Database type: mysql\n-- Generated at: 2024-03-09 14:05:07\n\nCREATE TABLE t (a INT);\n"
        );
    }
}
