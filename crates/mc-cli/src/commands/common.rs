//! Shared helpers for CLI commands

use crate::cli::EntityTargetArgs;
use anyhow::{Context, Result};
use mc_core::{Config, EntityId, Fields, Include, RelationIncludes};
use mc_meta::EntityRepository;
use serde::Serialize;

/// How an entity was named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EntityKey {
    Id(EntityId),
    Name(String),
}

impl EntityKey {
    /// A UUID is an id; anything else is a fully qualified name.
    pub(crate) fn parse(raw: &str) -> Self {
        match uuid::Uuid::parse_str(raw.trim()) {
            Ok(id) => EntityKey::Id(id),
            Err(_) => EntityKey::Name(raw.trim().to_string()),
        }
    }
}

/// Field list and include scopes for one read.
#[derive(Debug, Clone)]
pub(crate) struct ReadOptions {
    pub fields: Fields,
    pub include: Include,
    pub relation_includes: RelationIncludes,
}

impl ReadOptions {
    /// Resolve command line options against the configured read defaults.
    ///
    /// `--include` sets both the entity scope and the default for relation
    /// fields; `read.field_includes` from config apply unless overridden by
    /// `--field-include`.
    pub(crate) fn resolve(
        args: &EntityTargetArgs,
        repo: &EntityRepository<'_>,
        config: &Config,
    ) -> Result<Self> {
        let fields = match &args.fields {
            Some(spec) => repo.parse_fields(spec).context("Invalid --fields")?,
            None => Fields::empty(),
        };
        let include = match &args.include {
            Some(raw) => raw.parse::<Include>().context("Invalid --include")?,
            None => config.read.default_include,
        };

        let mut relation_includes =
            RelationIncludes::new(include, config.read.field_includes.clone());
        if let Some(spec) = &args.field_include {
            let overrides = RelationIncludes::parse_overrides(include, spec)
                .context("Invalid --field-include")?;
            for (field, field_include) in overrides.field_includes() {
                repo.descriptor()
                    .validate_relation_field(field)
                    .context("Invalid --field-include")?;
                relation_includes = relation_includes.with_field(field.clone(), *field_include);
            }
        }

        Ok(Self {
            fields,
            include,
            relation_includes,
        })
    }
}

/// Print `value` as JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<()> {
    let output = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .context("Failed to serialize JSON output")?;
    println!("{output}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Table-printing utilities
// ---------------------------------------------------------------------------

/// Calculate column widths for a table given headers and row data.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    widths
}

/// Render a left-aligned table: header, dashed separator, then rows.
/// Columns are separated by two spaces.
pub(crate) fn format_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let widths = calculate_column_widths(headers, rows);
    let pad = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(pad(headers.iter().map(|h| h.to_string()).collect()));
    lines.push(pad(widths.iter().map(|&w| "-".repeat(w)).collect()));
    lines.extend(rows.iter().map(|row| pad(row.clone())));
    lines
}

/// Print a formatted table to stdout.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    for line in format_table(headers, rows) {
        println!("{line}");
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
