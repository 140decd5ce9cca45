//! Load command implementation - writes a YAML seed into the catalog

use anyhow::{Context, Result};
use mc_meta::populate::load_seed;
use mc_meta::CatalogSeed;
use std::path::Path;

use crate::cli::{GlobalArgs, LoadArgs};
use crate::commands::common;
use crate::context::RuntimeContext;

/// Execute the load command
pub(crate) async fn execute(args: &LoadArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let seed = CatalogSeed::load(Path::new(&args.file))
        .with_context(|| format!("Failed to read seed {}", args.file))?;

    // Cleared in its own statement batch: DuckDB rejects re-inserting a
    // deleted key inside the same transaction.
    if args.replace {
        ctx.db
            .clear_catalog()
            .context("Failed to clear the catalog")?;
    }
    let summary = ctx
        .db
        .transaction(|conn| load_seed(conn, &seed))
        .with_context(|| format!("Failed to load seed {}", args.file))?;

    println!("Loaded {}:\n", args.file);
    let rows: Vec<Vec<String>> = [
        ("entities", summary.entities),
        ("relationships", summary.relationships),
        ("tags", summary.tags),
        ("votes", summary.votes),
        ("extensions", summary.extensions),
    ]
    .into_iter()
    .map(|(kind, count)| vec![kind.to_string(), count.to_string()])
    .collect();
    common::print_table(&["KIND", "COUNT"], &rows);
    Ok(())
}
