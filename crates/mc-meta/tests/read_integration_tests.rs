//! Integration tests for batched entity reads.
//!
//! Each test loads `fixtures/catalog.yml` into a fresh catalog and reads
//! entities back through the public repository API.

use mc_core::entity_type::{DOMAIN, GLOSSARY_TERM, TABLE};
use mc_core::{Fields, Include, LabelType, RelationIncludes, Relationship};
use mc_meta::populate::load_seed;
use mc_meta::query::{execute_query, list_tables, table_row_count};
use mc_meta::read::RequestEntityCache;
use mc_meta::{CatalogSeed, EntityRepository, MetaDb, RequestScope, SeedSummary};
use serde_json::json;
use std::path::PathBuf;

const ORDERS: &str = "warehouse.shop.public.orders";

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/catalog.yml")
}

fn seeded_db() -> MetaDb {
    let db = MetaDb::open_memory().unwrap();
    let seed = CatalogSeed::load(&fixture_path()).unwrap();
    db.transaction(|conn| load_seed(conn, &seed)).unwrap();
    db
}

fn names(refs: &[mc_core::EntityReference]) -> Vec<&str> {
    refs.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn fixture_loads_completely() {
    let db = MetaDb::open_memory().unwrap();
    let seed = CatalogSeed::load(&fixture_path()).unwrap();
    let summary = db.transaction(|conn| load_seed(conn, &seed)).unwrap();
    assert_eq!(
        summary,
        SeedSummary {
            entities: 15,
            relationships: 15,
            tags: 2,
            votes: 3,
            extensions: 2,
        }
    );
    assert_eq!(table_row_count(db.conn(), "entities").unwrap(), 15);
    assert_eq!(table_row_count(db.conn(), "tag_usage").unwrap(), 2);
}

#[test]
fn table_read_with_every_field() {
    let _scope = RequestScope::begin();
    let db = seeded_db();
    let repo = EntityRepository::new(&db, TABLE).unwrap();
    let fields = repo
        .parse_fields("owners,followers,domains,dataProducts,tags,votes,extension")
        .unwrap();
    let orders = repo
        .get_by_name(ORDERS, &fields, Include::NonDeleted, None)
        .unwrap();

    assert_eq!(orders.display_name.as_deref(), Some("Orders"));
    assert_eq!(names(orders.owners.as_ref().unwrap()), vec!["alice", "analytics"]);
    assert_eq!(names(orders.domains.as_ref().unwrap()), vec!["sales"]);
    assert_eq!(names(orders.data_products.as_ref().unwrap()), vec!["revenue"]);

    // Relation fields default to every entity; the deleted follower shows up.
    let followers = orders.followers.as_ref().unwrap();
    assert_eq!(names(followers), vec!["bob", "mallory"]);
    assert!(followers[1].deleted);

    let tags = orders.tags.as_ref().unwrap();
    assert_eq!(tags.len(), 2);
    assert!(tags
        .iter()
        .any(|t| t.tag_fqn == "Tier.Gold" && t.label_type == LabelType::Automated));

    // Deleted voters are not counted.
    let votes = orders.votes.as_ref().unwrap();
    assert_eq!((votes.up_votes, votes.down_votes), (1, 1));
    assert_eq!(votes.up_voters[0].name, "alice");

    assert_eq!(orders.extension, Some(json!({"retentionDays": 90, "sla": "gold"})));
    assert_eq!(orders.parent.as_ref().unwrap().name, "public");
    assert_eq!(orders.service.as_ref().unwrap().name, "warehouse");
}

#[test]
fn non_deleted_relation_include_hides_deleted_followers() {
    let _scope = RequestScope::begin();
    let db = seeded_db();
    let repo = EntityRepository::new(&db, TABLE).unwrap();
    let includes = RelationIncludes::parse_overrides(Include::All, "followers=non-deleted").unwrap();
    let orders = repo
        .get_by_name(ORDERS, &repo.parse_fields("followers,owners").unwrap(), Include::All, Some(&includes))
        .unwrap();
    assert_eq!(names(orders.followers.as_ref().unwrap()), vec!["bob"]);
    assert_eq!(orders.owners.unwrap().len(), 2);
}

#[test]
fn children_respect_include() {
    let _scope = RequestScope::begin();
    let db = seeded_db();
    let repo = EntityRepository::new(&db, GLOSSARY_TERM).unwrap();
    let fields = repo.parse_fields("children,reviewers").unwrap();

    let live = repo
        .get_by_name("finance", &fields, Include::NonDeleted, Some(&RelationIncludes::from_include(Some(Include::NonDeleted))))
        .unwrap();
    assert_eq!(names(live.children.as_ref().unwrap()), vec!["arr"]);
    assert_eq!(names(live.reviewers.as_ref().unwrap()), vec!["alice"]);

    let deleted = repo
        .get_by_name("finance", &fields, Include::NonDeleted, Some(&RelationIncludes::from_include(Some(Include::Deleted))))
        .unwrap();
    assert_eq!(names(deleted.children.as_ref().unwrap()), vec!["mrr"]);
}

#[test]
fn domain_experts_and_subdomains() {
    let _scope = RequestScope::begin();
    let db = seeded_db();
    let repo = EntityRepository::new(&db, DOMAIN).unwrap();
    let sales = repo
        .get_by_name("sales", &repo.parse_fields("experts,children").unwrap(), Include::All, None)
        .unwrap();
    assert_eq!(names(sales.experts.as_ref().unwrap()), vec!["bob"]);
    assert_eq!(names(sales.children.as_ref().unwrap()), vec!["emea"]);
}

#[test]
fn deleting_a_schema_cascades_and_restores() {
    let _scope = RequestScope::begin();
    let db = seeded_db();
    let tables = EntityRepository::new(&db, TABLE).unwrap();
    let schemas = EntityRepository::new(&db, "databaseSchema").unwrap();
    let public = schemas
        .get_by_name("warehouse.shop.public", &Fields::empty(), Include::All, None)
        .unwrap();

    assert_eq!(schemas.delete(public.id).unwrap(), 3);
    assert!(tables
        .get_by_name(ORDERS, &Fields::empty(), Include::NonDeleted, None)
        .is_err());

    assert_eq!(schemas.restore(public.id).unwrap(), 3);
    let orders = tables
        .get_by_name(ORDERS, &Fields::empty(), Include::NonDeleted, None)
        .unwrap();
    assert!(!orders.deleted);
}

#[test]
fn cached_read_is_invalidated_by_relationship_change() {
    let _scope = RequestScope::begin();
    let db = seeded_db();
    let tables = EntityRepository::new(&db, TABLE).unwrap();
    let fields = tables.parse_fields("owners").unwrap();

    let orders = tables.get_by_name(ORDERS, &fields, Include::All, None).unwrap();
    let customers = tables
        .get_by_name("warehouse.shop.public.customers", &fields, Include::All, None)
        .unwrap();
    assert_eq!(RequestEntityCache::len(), 2);

    let alice = orders.owners.as_ref().unwrap()[0].clone();
    tables
        .add_relationship(&alice, &customers.entity_reference(), Relationship::Owns)
        .unwrap();
    // Orders mentions alice; customers is the other end of the new edge.
    assert!(RequestEntityCache::is_empty());

    let customers = tables
        .get_by_name("warehouse.shop.public.customers", &fields, Include::All, None)
        .unwrap();
    assert_eq!(names(customers.owners.as_ref().unwrap()), vec!["alice"]);
}

#[test]
fn read_plan_for_table_includes_prefetch() {
    let db = seeded_db();
    let repo = EntityRepository::new(&db, TABLE).unwrap();
    let _scope = RequestScope::begin();
    let orders = repo
        .get_by_name(ORDERS, &Fields::empty(), Include::All, None)
        .unwrap();
    let plan = repo.plan(&orders, &repo.parse_fields("owners,tags").unwrap(), None);
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["entitySpecificPrefetchKeys"], json!(["table.defaultFields"]));
    assert_eq!(json["loadTags"], json!(true));
}

#[test]
fn adhoc_queries_see_the_catalog() {
    let db = seeded_db();
    let tables = list_tables(db.conn()).unwrap();
    for expected in ["entities", "entity_extension", "entity_relationship", "tag_usage"] {
        assert!(tables.iter().any(|t| t == expected), "missing {expected}");
    }
    let result = execute_query(
        db.conn(),
        "SELECT entity_type, COUNT(*) AS n FROM mc_meta.entities \
         WHERE deleted = false GROUP BY entity_type ORDER BY entity_type",
    )
    .unwrap();
    assert_eq!(result.columns, vec!["entity_type", "n"]);
    let rows = result.to_json_rows();
    assert_eq!(rows[0]["entity_type"], "dataProduct");
}

#[test]
fn catalog_file_survives_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested/catalog.duckdb");
    {
        let db = MetaDb::open(&path).unwrap();
        let seed = CatalogSeed::load(&fixture_path()).unwrap();
        db.transaction(|conn| load_seed(conn, &seed)).unwrap();
    }
    let db = MetaDb::open(&path).unwrap();
    let _scope = RequestScope::begin();
    let repo = EntityRepository::new(&db, TABLE).unwrap();
    let orders = repo
        .get_by_name(ORDERS, &repo.parse_fields("owners").unwrap(), Include::All, None)
        .unwrap();
    assert_eq!(orders.owners.unwrap().len(), 2);
}
