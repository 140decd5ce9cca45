//! Catalog database query and inspection commands.

use crate::cli::{GlobalArgs, MetaArgs, MetaCommands, MetaQueryArgs};
use crate::commands::common;
use crate::context::RuntimeContext;
use anyhow::{Context, Result};
use mc_meta::query::{execute_query, list_tables, table_row_count};

/// Execute the meta command.
pub(crate) async fn execute(args: &MetaArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    match &args.command {
        MetaCommands::Query(query_args) => run_query(&ctx, query_args),
        MetaCommands::Tables => show_tables(&ctx),
    }
}

fn run_query(ctx: &RuntimeContext, args: &MetaQueryArgs) -> Result<()> {
    let result = execute_query(ctx.db.conn(), &args.sql).context("Failed to execute query")?;

    if args.json {
        return common::print_json(&result.to_json_rows(), false);
    }
    if result.rows.is_empty() {
        println!("(0 rows)");
        return Ok(());
    }
    let headers: Vec<&str> = result.columns.iter().map(String::as_str).collect();
    common::print_table(&headers, &result.rows);
    println!("\n({} rows)", result.rows.len());
    Ok(())
}

fn show_tables(ctx: &RuntimeContext) -> Result<()> {
    let conn = ctx.db.conn();
    let tables = list_tables(conn).context("Failed to list catalog tables")?;

    let rows: Vec<Vec<String>> = tables
        .iter()
        .map(|table| {
            let count = table_row_count(conn, table).unwrap_or_else(|e| {
                log::warn!("Failed to count rows in {table}: {e}");
                0
            });
            vec![table.clone(), count.to_string()]
        })
        .collect();

    println!("Catalog tables ({}):\n", tables.len());
    common::print_table(&["TABLE", "ROWS"], &rows);
    Ok(())
}
