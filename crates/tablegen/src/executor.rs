//! Runs generated statements.

use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use tracing::{debug, info};

use crate::error::{CliError, Result};

/// Destination for DDL statements.
#[allow(async_fn_in_trait)]
pub trait DdlSink {
    /// Executes one statement, without a trailing `;`.
    async fn execute(&mut self, statement: &str) -> std::result::Result<(), sqlx::Error>;
}

/// Outcome of [`apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Statements sent to the sink.
    pub executed: usize,
    /// Comment-only statements skipped.
    pub skipped: usize,
}

/// Returns true for statements made only of `--` comment lines.
fn is_comment_only(statement: &str) -> bool {
    statement
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .all(|l| l.starts_with("--"))
}

/// Sends `statements` to `sink` in order, stopping at the first failure.
///
/// # Errors
///
/// Returns [`CliError::Statement`] for the first statement the sink rejects.
pub async fn apply<S: DdlSink>(sink: &mut S, statements: &[&str]) -> Result<ApplyReport> {
    let mut report = ApplyReport::default();
    for (i, statement) in statements.iter().enumerate() {
        if is_comment_only(statement) {
            debug!(statement = %statement, "Skipping comment");
            report.skipped += 1;
            continue;
        }
        debug!(sql = %statement, "Executing SQL");
        sink.execute(statement)
            .await
            .map_err(|source| CliError::Statement {
                index: i + 1,
                statement: (*statement).to_string(),
                source,
            })?;
        report.executed += 1;
    }
    info!(
        executed = report.executed,
        skipped = report.skipped,
        "Applied statements"
    );
    Ok(report)
}

/// Logs statements instead of running them.
#[derive(Debug, Clone, Default)]
pub struct DryRunSink {
    statements: Vec<String>,
}

impl DryRunSink {
    /// Creates an empty dry-run sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Statements received so far.
    #[must_use]
    pub fn statements(&self) -> &[String] {
        &self.statements
    }
}

impl DdlSink for DryRunSink {
    async fn execute(&mut self, statement: &str) -> std::result::Result<(), sqlx::Error> {
        info!("[dry run] {statement}");
        self.statements.push(statement.to_string());
        Ok(())
    }
}

/// Runs statements against a live database through `sqlx::any`.
#[derive(Debug, Clone)]
pub struct SqlxSink {
    pool: AnyPool,
}

impl SqlxSink {
    /// Wraps an existing pool.
    #[must_use]
    pub const fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    /// Connects to `url` (MySQL or PostgreSQL).
    ///
    /// # Errors
    ///
    /// Fails when the URL scheme has no driver or the connection fails.
    pub async fn connect(url: &str) -> Result<Self> {
        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await?;
        info!("Connected to database");
        Ok(Self::new(pool))
    }

    /// Closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl DdlSink for SqlxSink {
    async fn execute(&mut self, statement: &str) -> std::result::Result<(), sqlx::Error> {
        sqlx::raw_sql(statement).execute(&self.pool).await?;
        Ok(())
    }
}
