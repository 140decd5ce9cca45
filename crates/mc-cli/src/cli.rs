//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// Metacat - a metadata catalog with batched entity reads
#[derive(Parser, Debug)]
#[command(name = "mcat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write metacat.yml and create the catalog database
    Init(InitArgs),

    /// Load a YAML catalog seed
    Load(LoadArgs),

    /// Read one entity and print it as JSON
    Get(GetArgs),

    /// Print the read plan for an entity as JSON
    Plan(PlanArgs),

    /// Query and inspect the catalog database
    Meta(MetaArgs),
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Catalog name (default: project directory name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Catalog database path, relative to the project directory
    #[arg(long, default_value = "target/catalog.duckdb")]
    pub database_path: String,

    /// Overwrite an existing metacat.yml
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the load command
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Seed file to load
    pub file: String,

    /// Delete the existing catalog contents first
    #[arg(long)]
    pub replace: bool,
}

/// Which entity to read, and how
#[derive(Args, Debug, Clone)]
pub struct EntityTargetArgs {
    /// Entity type, e.g. table or glossaryTerm
    pub entity_type: String,

    /// Entity id (UUID) or fully qualified name
    pub key: String,

    /// Fields to populate (comma-separated, e.g. owners,tags)
    #[arg(short, long)]
    pub fields: Option<String>,

    /// Include scope for the entity and relation fields: all, deleted, non-deleted
    #[arg(short, long)]
    pub include: Option<String>,

    /// Per relation field include overrides (e.g. owners=all,domains=deleted)
    #[arg(long)]
    pub field_include: Option<String>,
}

/// Arguments for the get command
#[derive(Args, Debug)]
pub struct GetArgs {
    #[command(flatten)]
    pub target: EntityTargetArgs,

    /// Print single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Bypass the request entity cache
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub target: EntityTargetArgs,

    /// Also execute the plan and report the queries it issued
    #[arg(long)]
    pub stats: bool,
}

/// Arguments for the meta command
#[derive(Args, Debug)]
pub struct MetaArgs {
    #[command(subcommand)]
    pub command: MetaCommands,
}

/// Meta subcommands
#[derive(Subcommand, Debug)]
pub enum MetaCommands {
    /// Run a SQL query against the catalog database
    Query(MetaQueryArgs),

    /// List catalog tables with row counts
    Tables,
}

/// Arguments for meta query
#[derive(Args, Debug)]
pub struct MetaQueryArgs {
    /// SQL to execute
    pub sql: String,

    /// Print rows as JSON objects
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
