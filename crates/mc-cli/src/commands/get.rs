//! Get command implementation - reads one entity through the repository

use anyhow::{Context, Result};
use mc_core::Entity;
use mc_meta::{EntityRepository, RequestScope};

use crate::cli::{GetArgs, GlobalArgs};
use crate::commands::common::{self, EntityKey, ReadOptions};
use crate::context::RuntimeContext;

/// Execute the get command
pub(crate) async fn execute(args: &GetArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let _scope = RequestScope::begin();

    let mut repo = ctx.repository(&args.target.entity_type)?;
    if args.no_cache {
        repo = repo.with_request_cache(false);
    }
    let options = ReadOptions::resolve(&args.target, &repo, &ctx.config)?;
    let entity = read_entity(&repo, &args.target.key, &options)?;
    common::print_json(&entity, args.compact)
}

/// Read the entity named by `key` (id or fully qualified name).
pub(crate) fn read_entity(
    repo: &EntityRepository<'_>,
    key: &str,
    options: &ReadOptions,
) -> Result<Entity> {
    let entity = match EntityKey::parse(key) {
        EntityKey::Id(id) => repo.get_by_id(
            id,
            &options.fields,
            options.include,
            Some(&options.relation_includes),
        ),
        EntityKey::Name(fqn) => repo.get_by_name(
            &fqn,
            &options.fields,
            options.include,
            Some(&options.relation_includes),
        ),
    };
    entity.with_context(|| format!("Failed to read {} '{key}'", repo.descriptor().name))
}
