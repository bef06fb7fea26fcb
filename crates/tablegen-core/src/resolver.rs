//! Inheritance resolution.
//!
//! A table may declare `extends = "parent"`; resolution flattens the chain
//! so every table carries its inherited fields, indexes and relations.
//! Members are merged with an ordered map: parent members first in the
//! parent's order, then each child member either replaces the inherited
//! member of the same key *in place* or is appended.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::SchemaError;
use crate::schema::{Field, Index, PrimaryKeyKind, Relation, Schema, Table};

/// How schema problems are handled during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveMode {
    /// Log and collect problems, keep going with a partial result.
    #[default]
    Lenient,
    /// Fail on the first problem.
    Strict,
}

/// Output of a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The resolved schema.
    pub schema: Schema,
    /// Problems found in lenient mode, in discovery order.
    pub warnings: Vec<SchemaError>,
}

impl Resolution {
    /// Returns true when nothing was reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Flattens `extends` chains and normalises primary-key kinds.
#[derive(Debug, Clone, Copy, Default)]
pub struct InheritanceResolver {
    mode: ResolveMode,
}

/// Mutable state threaded through one resolution pass.
struct Pass<'a> {
    mode: ResolveMode,
    by_name: HashMap<String, usize>,
    done: HashSet<usize>,
    warnings: &'a mut Vec<SchemaError>,
}

impl InheritanceResolver {
    /// Creates a resolver with the given mode.
    #[must_use]
    pub const fn new(mode: ResolveMode) -> Self {
        Self { mode }
    }

    /// Creates a lenient resolver.
    #[must_use]
    pub const fn lenient() -> Self {
        Self::new(ResolveMode::Lenient)
    }

    /// Creates a strict resolver.
    #[must_use]
    pub const fn strict() -> Self {
        Self::new(ResolveMode::Strict)
    }

    /// Returns the mode.
    #[must_use]
    pub const fn mode(&self) -> ResolveMode {
        self.mode
    }

    /// Resolves every table of the schema.
    ///
    /// Resolution is idempotent: resolving the output again yields the same
    /// schema.
    ///
    /// # Errors
    ///
    /// In strict mode, returns the first duplicate, missing parent or cycle.
    /// Lenient mode never fails.
    pub fn resolve(&self, mut schema: Schema) -> Result<Resolution, SchemaError> {
        let mut warnings = Vec::new();
        self.resolve_in_place(&mut schema, &mut warnings)?;
        Ok(Resolution { schema, warnings })
    }

    fn resolve_in_place(
        &self,
        schema: &mut Schema,
        warnings: &mut Vec<SchemaError>,
    ) -> Result<(), SchemaError> {
        info!(
            schema = %schema.name,
            tables = schema.tables.len(),
            "Resolving table inheritance"
        );
        let mut pass = Pass {
            mode: self.mode,
            by_name: HashMap::with_capacity(schema.tables.len()),
            done: HashSet::new(),
            warnings,
        };

        let mut tables = Vec::with_capacity(schema.tables.len());
        for table in std::mem::take(&mut schema.tables) {
            if pass.by_name.contains_key(&table.name) {
                pass.report(SchemaError::DuplicateTable(table.name.clone()))?;
            } else {
                pass.by_name.insert(table.name.clone(), tables.len());
                tables.push(table);
            }
        }
        schema.tables = tables;

        for table in &mut schema.tables {
            dedupe_fields(table, &mut pass)?;
        }

        let mut path = Vec::new();
        for i in 0..schema.tables.len() {
            pass.resolve_table(i, &mut schema.tables, &mut path)?;
        }

        for table in &mut schema.tables {
            for field in &mut table.fields {
                normalize_primary_key(field);
            }
        }
        Ok(())
    }
}

impl Pass<'_> {
    fn report(&mut self, problem: SchemaError) -> Result<(), SchemaError> {
        match self.mode {
            ResolveMode::Strict => Err(problem),
            ResolveMode::Lenient => {
                warn!("{problem}");
                self.warnings.push(problem);
                Ok(())
            }
        }
    }

    fn resolve_table(
        &mut self,
        idx: usize,
        tables: &mut [Table],
        path: &mut Vec<String>,
    ) -> Result<(), SchemaError> {
        if self.done.contains(&idx) {
            return Ok(());
        }

        let name = tables[idx].name.clone();
        if path.contains(&name) {
            let mut chain = path.clone();
            chain.push(name.clone());
            return self.report(SchemaError::CyclicInheritance { table: name, chain });
        }

        let Some(parent_name) = tables[idx].parent().map(str::to_string) else {
            self.done.insert(idx);
            return Ok(());
        };

        let Some(&parent_idx) = self.by_name.get(&parent_name) else {
            self.done.insert(idx);
            return self.report(SchemaError::MissingParent {
                table: name,
                parent: parent_name,
            });
        };

        path.push(name.clone());
        let parent_result = self.resolve_table(parent_idx, tables, path);
        path.pop();
        parent_result?;

        let parent = &tables[parent_idx];
        let (fields, indexes, relations) = (
            parent.fields.clone(),
            parent.indexes.clone(),
            parent.relations.clone(),
        );
        let child = &mut tables[idx];
        child.fields = merge_by_key(fields, std::mem::take(&mut child.fields), |f| {
            f.name.clone()
        });
        child.indexes = merge_by_key(
            indexes,
            std::mem::take(&mut child.indexes),
            Index::merge_key,
        );
        child.relations = merge_by_key(
            relations,
            std::mem::take(&mut child.relations),
            Relation::merge_key,
        );

        debug!(table = %name, parent = %parent_name, "Merged inherited members");
        self.done.insert(idx);
        Ok(())
    }
}

/// Merges `inherited` and `own`: a key already present keeps its position and
/// takes the later value; new keys are appended.
fn merge_by_key<T, K>(inherited: Vec<T>, own: Vec<T>, key: K) -> Vec<T>
where
    K: Fn(&T) -> String,
{
    let mut merged: IndexMap<String, T> = IndexMap::with_capacity(inherited.len() + own.len());
    for item in inherited.into_iter().chain(own) {
        merged.insert(key(&item), item);
    }
    merged.into_values().collect()
}

fn dedupe_fields(table: &mut Table, pass: &mut Pass<'_>) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    let mut has_duplicates = false;
    for field in &table.fields {
        if !seen.insert(field.name.as_str()) {
            has_duplicates = true;
            pass.report(SchemaError::DuplicateField {
                table: table.name.clone(),
                field: field.name.clone(),
            })?;
        }
    }
    if has_duplicates {
        table.fields = merge_by_key(Vec::new(), std::mem::take(&mut table.fields), |f| {
            f.name.clone()
        });
    }
    Ok(())
}

/// Folds the legacy `autoIncrement` flag into the primary-key kind.
fn normalize_primary_key(field: &mut Field) {
    if field.auto_increment
        && matches!(
            field.primary_key,
            PrimaryKeyKind::None | PrimaryKeyKind::Single
        )
    {
        field.primary_key = PrimaryKeyKind::AutoIncrement;
    }
    field.auto_increment = false;
}

/// Resolves a schema leniently, collecting every problem as a warning.
#[must_use]
pub fn resolve(mut schema: Schema) -> Resolution {
    let mut warnings = Vec::new();
    if let Err(problem) =
        InheritanceResolver::lenient().resolve_in_place(&mut schema, &mut warnings)
    {
        warnings.push(problem);
    }
    Resolution { schema, warnings }
}
