//! Plan command implementation - shows what a read would load

use anyhow::Result;
use mc_core::Fields;
use mc_meta::read::{execute_plan, ReadBundle};
use mc_meta::RequestScope;

use crate::cli::{GlobalArgs, PlanArgs};
use crate::commands::common::{self, ReadOptions};
use crate::commands::get::read_entity;
use crate::context::RuntimeContext;

/// Execute the plan command
pub(crate) async fn execute(args: &PlanArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let _scope = RequestScope::begin();

    let repo = ctx.repository(&args.target.entity_type)?;
    let options = ReadOptions::resolve(&args.target, &repo, &ctx.config)?;

    // The plan is built from the stored document; no fields are loaded yet.
    let base = ReadOptions {
        fields: Fields::empty(),
        ..options.clone()
    };
    let entity = read_entity(&repo, &args.target.key, &base)?;
    let plan = repo.plan(&entity, &options.fields, Some(&options.relation_includes));
    common::print_json(&plan, false)?;

    if args.stats {
        let mut bundle = ReadBundle::new();
        let stats = execute_plan(ctx.db.conn(), &plan, &entity.entity_type, &mut bundle)?;
        eprintln!(
            "queries: {} (relations {}, tags {}, votes {}, extension {})",
            stats.total(),
            stats.relation_queries,
            stats.tag_queries,
            stats.vote_queries,
            stats.extension_queries
        );
    }
    Ok(())
}
