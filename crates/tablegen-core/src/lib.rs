//! Declarative table schemas compiled to DDL for several database engines.
//!
//! `tablegen-core` turns a structured schema description into `CREATE`
//! statements for H2, MySQL, PostgreSQL, Oracle and SQL Server:
//!
//! - **Schema** - value types for a database, its tables, fields, indexes
//!   and relations, deserializable from the usual JSON shape
//! - **Resolver** - flattens `extends` chains between tables
//! - **Dialect** - per-engine quoting, type mapping and statement templates
//! - **Assembler** - resolves a schema and collects every statement
//!
//! The crate does no I/O.
//!
//! # Example
//!
//! ```rust
//! use tablegen_core::prelude::*;
//!
//! let schema = Schema::new("shop").table(
//!     Table::new("users")
//!         .field(
//!             Field::new("id", FieldType::Long)
//!                 .not_null()
//!                 .primary_key(PrimaryKeyKind::AutoIncrement),
//!         )
//!         .field(Field::new("email", FieldType::String).not_null()),
//! );
//!
//! let sql = compile_schema(&schema, DatabaseType::Postgresql).unwrap();
//! assert!(sql.contains("\"id\" BIGSERIAL NOT NULL"));
//! assert!(sql.contains("\"email\" VARCHAR(255) NOT NULL"));
//! ```

pub mod assembler;
pub mod dialect;
pub mod error;
pub mod resolver;
pub mod schema;

pub use assembler::{
    compile_schema, compile_teardown, CompileOptions, CompiledSchema, DdlAssembler, TableOrder,
};
pub use dialect::{dialect_for, DatabaseType, Dialect};
pub use error::{DialectError, Error, Result, SchemaError};
pub use resolver::{resolve, InheritanceResolver, Resolution, ResolveMode};
pub use schema::Schema;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::assembler::{
        compile_schema, compile_teardown, CompileOptions, CompiledSchema, DdlAssembler,
        TableOrder,
    };
    pub use crate::dialect::{
        dialect_for, DatabaseType, Dialect, H2Dialect, MySqlDialect, OracleDialect,
        PostgresDialect, SqlServerDialect,
    };
    pub use crate::error::{DialectError, Error, Result, SchemaError};
    pub use crate::resolver::{resolve, InheritanceResolver, Resolution, ResolveMode};
    pub use crate::schema::{
        Field, FieldType, Index, IndexColumn, IndexKind, IndexMethod, PrimaryKeyKind, Relation,
        RelationAction, RelationKind, Schema, SortOrder, Table,
    };
}
