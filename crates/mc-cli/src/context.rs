//! Runtime context for CLI commands

use anyhow::{Context, Result};
use mc_core::Config;
use mc_meta::{EntityRepository, MetaDb};
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Loaded configuration and an open catalog database.
pub(crate) struct RuntimeContext {
    pub config: Config,
    pub db: MetaDb,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub(crate) fn new(args: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&args.project_dir);

        // Load config from custom path or project directory
        let config = if let Some(config_path) = &args.config {
            Config::load(Path::new(config_path)).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(&root).context("Failed to load project configuration")?
        };

        let db = open_catalog(&config, &root)?;
        Ok(Self { config, db })
    }

    /// Repository for `entity_type`, honouring the configured request cache setting.
    pub(crate) fn repository(&self, entity_type: &str) -> Result<EntityRepository<'_>> {
        let repo = EntityRepository::new(&self.db, entity_type)
            .with_context(|| format!("Cannot read entities of type '{entity_type}'"))?;
        Ok(repo.with_request_cache(self.config.read.request_cache))
    }
}

/// Open (and migrate) the catalog database configured for `root`.
pub(crate) fn open_catalog(config: &Config, root: &Path) -> Result<MetaDb> {
    if config.is_memory_database() {
        log::warn!("Catalog database is in memory; nothing will be persisted");
        return MetaDb::open_memory().context("Failed to open in-memory catalog");
    }
    let path = config.database_path_absolute(root);
    log::debug!("Opening catalog database at {}", path.display());
    MetaDb::open(&path)
        .with_context(|| format!("Failed to open catalog database at {}", path.display()))
}
