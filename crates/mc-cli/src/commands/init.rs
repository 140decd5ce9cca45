//! Init command implementation - writes metacat.yml and creates the catalog

use anyhow::{Context, Result};
use mc_core::config::CONFIG_FILE_NAMES;
use mc_core::Config;
use std::fs;
use std::path::Path;

use crate::cli::{GlobalArgs, InitArgs};
use crate::context::open_catalog;

/// Execute the init command
pub(crate) async fn execute(args: &InitArgs, global: &GlobalArgs) -> Result<()> {
    let project_dir = Path::new(&global.project_dir);
    let name = match &args.name {
        Some(name) => name.clone(),
        None => default_name(project_dir),
    };

    let config_path = project_dir.join(CONFIG_FILE_NAMES[0]);
    if config_path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            config_path.display()
        );
    }

    let mut config = Config::with_name(name);
    config.database.path = args.database_path.clone();
    config.validate().context("Invalid catalog settings")?;

    fs::create_dir_all(project_dir)
        .with_context(|| format!("Failed to create directory: {}", project_dir.display()))?;
    fs::write(&config_path, config.to_yaml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    // Opening runs the schema migrations.
    open_catalog(&config, project_dir)?;

    println!("Initialized catalog '{}'", config.name);
    println!("  config:   {}", config_path.display());
    println!(
        "  database: {}",
        config.database_path_absolute(project_dir).display()
    );
    Ok(())
}

/// Name of the project directory, or `catalog` when it has none (e.g. `.`).
fn default_name(project_dir: &Path) -> String {
    project_dir
        .canonicalize()
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .or_else(|| project_dir.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "catalog".to_string())
}
