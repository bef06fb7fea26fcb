//! tablegen CLI
//!
//! Compiles JSON table schemas to DDL for H2, MySQL, PostgreSQL, Oracle and
//! SQL Server.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use tablegen::{
    apply, compile_path, read_schema, Config, DryRunSink, JsonSchemaSource, SqlFileWriter,
    SqlxSink,
};
use tablegen_core::{DdlAssembler, InheritanceResolver, ResolveMode, TableOrder};

/// Declarative table schemas to multi-dialect DDL.
#[derive(Parser)]
#[command(name = "tablegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./tablegen.toml when present).
    #[arg(short, long, env = "TABLEGEN_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// How schema problems are handled.
#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Warn and keep going.
    Lenient,
    /// Fail on the first problem.
    Strict,
}

impl From<ModeArg> for ResolveMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Lenient => Self::Lenient,
            ModeArg::Strict => Self::Strict,
        }
    }
}

/// Table emission order.
#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    /// As declared in the schema.
    Declaration,
    /// Referenced tables first.
    Dependency,
}

impl From<OrderArg> for TableOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Declaration => Self::Declaration,
            OrderArg::Dependency => Self::Dependency,
        }
    }
}

#[derive(Args)]
struct TargetArgs {
    /// Schema document (JSON), or `-` for stdin.
    schema: PathBuf,

    /// Database type: h2, mysql, postgresql, oracle or sqlserver.
    #[arg(short, long, env = "TABLEGEN_DIALECT")]
    dialect: Option<String>,

    /// How schema problems are handled.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Table emission order.
    #[arg(long, value_enum)]
    order: Option<OrderArg>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the creation script and save it under the output directory.
    Compile {
        #[command(flatten)]
        target: TargetArgs,

        /// Output directory for saved scripts.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Print only, do not save.
        #[arg(long)]
        no_save: bool,
    },

    /// Print the schema after inheritance resolution, as JSON.
    Resolve {
        /// Schema document (JSON), or `-` for stdin.
        schema: PathBuf,

        /// How schema problems are handled.
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },

    /// Print the script that drops everything the schema creates.
    Teardown {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Compile and run the creation script against a database.
    Apply {
        #[command(flatten)]
        target: TargetArgs,

        /// Database URL (mysql://... or postgres://...).
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// Leave out the CREATE DATABASE statement.
        #[arg(long)]
        skip_database: bool,

        /// Show SQL without executing (dry run).
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cwd = std::env::current_dir()?;
    let config = Config::discover(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::Compile {
            target,
            output_dir,
            no_save,
        } => {
            let database_type = config.dialect(target.dialect.as_deref())?;
            let options = config.compile_options(
                target.mode.map(Into::into),
                target.order.map(Into::into),
            );
            let compiled = compile_path(&target.schema, database_type, options)?;
            let sql = compiled.to_sql();
            println!("{sql}");

            if config.output.save && !no_save {
                let writer = SqlFileWriter::new(config.output_dir(output_dir.as_deref()));
                writer.write(&compiled.schema_name, database_type, &sql)?;
            }
            if !compiled.warnings.is_empty() {
                warn!(
                    "Compiled with {} schema warning(s)",
                    compiled.warnings.len()
                );
            }
        }

        Commands::Resolve { schema, mode } => {
            let mode = mode.map_or(config.compile.mode, Into::into);
            let schema = read_schema(&JsonSchemaSource, &schema)?;
            let resolution = InheritanceResolver::new(mode).resolve(schema)?;
            println!("{}", serde_json::to_string_pretty(&resolution.schema)?);
            if !resolution.is_clean() {
                warn!(
                    "Resolved with {} schema warning(s)",
                    resolution.warnings.len()
                );
            }
        }

        Commands::Teardown { target } => {
            let database_type = config.dialect(target.dialect.as_deref())?;
            let options = config.compile_options(
                target.mode.map(Into::into),
                target.order.map(Into::into),
            );
            let schema = read_schema(&JsonSchemaSource, &target.schema)?;
            let sql = DdlAssembler::new(database_type)
                .with_options(options)
                .teardown_sql(&schema)?;
            println!("{sql}");
        }

        Commands::Apply {
            target,
            database_url,
            skip_database,
            dry_run,
        } => {
            let database_type = config.dialect(target.dialect.as_deref())?;
            let options = config.compile_options(
                target.mode.map(Into::into),
                target.order.map(Into::into),
            );
            let compiled = compile_path(&target.schema, database_type, options)?;
            let skip = if skip_database {
                compiled.database.len()
            } else {
                0
            };
            let all = compiled.statements();
            let statements = &all[skip..];

            if dry_run {
                info!("Dry run mode - SQL will be printed but not executed.");
                let mut sink = DryRunSink::new();
                apply(&mut sink, statements).await?;
            } else {
                let url = config.database_url(database_url.as_deref())?;
                let mut sink = SqlxSink::connect(&url).await?;
                let report = apply(&mut sink, statements).await;
                sink.close().await;
                let report = report?;
                info!(
                    "Applied {} statement(s) to {}",
                    report.executed, compiled.schema_name
                );
            }
        }
    }

    Ok(())
}
