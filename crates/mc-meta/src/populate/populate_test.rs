//! Tests for the write functions and the seed loader.

use super::*;
use crate::query::{
    find_entity_by_id, find_extension, find_tags, find_to_relations_batch, find_votes,
    get_entity_by_name,
};
use crate::test_utils::{entity, open, relate};
use mc_core::entity_type::{DATABASE_SCHEMA, TABLE, USER};
use mc_core::{EntityType, Include, Relationship, TagLabel, TagState, VoteType};
use serde_json::json;
use std::collections::BTreeSet;

fn count(db: &crate::MetaDb, sql: &str) -> i64 {
    db.conn().query_row(sql, [], |row| row.get(0)).unwrap()
}

// ── Entities ───────────────────────────────────────────────────────────

#[test]
fn insert_duplicate_fqn_fails() {
    let db = open();
    entity(&db, TABLE, "shop.orders");
    let dup = mc_core::Entity::new(EntityType::new(TABLE), "orders", "shop.orders");
    let err = insert_entity(db.conn(), &dup).unwrap_err();
    assert!(err.to_string().contains("M005"));
}

#[test]
fn soft_delete_cascades_through_contains() {
    let db = open();
    let schema = entity(&db, DATABASE_SCHEMA, "shop.public");
    let orders = entity(&db, TABLE, "shop.public.orders");
    let customers = entity(&db, TABLE, "shop.public.customers");
    relate(&db, &schema, &orders, Relationship::Contains);
    relate(&db, &schema, &customers, Relationship::Contains);

    assert_eq!(soft_delete_entity(db.conn(), schema.id).unwrap().len(), 3);
    assert_eq!(
        count(&db, "SELECT COUNT(*) FROM mc_meta.entities WHERE deleted"),
        3
    );

    assert_eq!(restore_entity(db.conn(), schema.id).unwrap().len(), 3);
    assert!(find_entity_by_id(db.conn(), TABLE, orders.id, Include::NonDeleted)
        .unwrap()
        .is_some());
}

#[test]
fn soft_delete_unknown_id_touches_nothing() {
    let db = open();
    assert!(soft_delete_entity(db.conn(), uuid::Uuid::new_v4())
        .unwrap()
        .is_empty());
}

// ── Relationships ──────────────────────────────────────────────────────

#[test]
fn add_relationship_is_idempotent_and_revives() {
    let db = open();
    let alice = entity(&db, USER, "alice");
    let orders = entity(&db, TABLE, "shop.orders");
    relate(&db, &alice, &orders, Relationship::Owns);
    db.conn()
        .execute("UPDATE mc_meta.entity_relationship SET deleted = true", [])
        .unwrap();
    relate(&db, &alice, &orders, Relationship::Owns);

    assert_eq!(count(&db, "SELECT COUNT(*) FROM mc_meta.entity_relationship"), 1);
    assert_eq!(
        count(&db, "SELECT COUNT(*) FROM mc_meta.entity_relationship WHERE deleted"),
        0
    );
}

#[test]
fn delete_relationship_removes_row() {
    let db = open();
    let alice = entity(&db, USER, "alice");
    let orders = entity(&db, TABLE, "shop.orders");
    relate(&db, &alice, &orders, Relationship::Owns);
    assert_eq!(
        delete_relationship(db.conn(), alice.id, orders.id, Relationship::Owns).unwrap(),
        1
    );
    assert_eq!(
        delete_relationship(db.conn(), alice.id, orders.id, Relationship::Owns).unwrap(),
        0
    );
}

// ── Tags, votes, extensions ────────────────────────────────────────────

#[test]
fn apply_tag_upserts() {
    let db = open();
    let orders = entity(&db, TABLE, "shop.orders");
    let mut label = TagLabel::classification("PII.Sensitive");
    label.state = TagState::Suggested;
    apply_tag(db.conn(), orders.id, &label).unwrap();
    apply_tag(db.conn(), orders.id, &TagLabel::classification("PII.Sensitive")).unwrap();
    apply_tag(db.conn(), orders.id, &TagLabel::classification("Tier.Gold")).unwrap();

    let tags = find_tags(db.conn(), orders.id).unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].tag_fqn, "PII.Sensitive");
    assert_eq!(tags[0].state, TagState::Confirmed);

    assert_eq!(remove_tag(db.conn(), orders.id, "Tier.Gold").unwrap(), 1);
    assert_eq!(find_tags(db.conn(), orders.id).unwrap().len(), 1);
}

#[test]
fn revoting_replaces_and_unvote_removes() {
    let db = open();
    let alice = entity(&db, USER, "alice");
    let bob = entity(&db, USER, "bob");
    let orders = entity(&db, TABLE, "shop.orders");
    let target = RelationEnd::new(orders.id, TABLE);

    record_vote(db.conn(), alice.id, target, VoteType::VotedUp).unwrap();
    record_vote(db.conn(), bob.id, target, VoteType::VotedUp).unwrap();
    record_vote(db.conn(), bob.id, target, VoteType::VotedDown).unwrap();
    let votes = find_votes(db.conn(), orders.id).unwrap();
    assert_eq!(votes.up_votes, 1);
    assert_eq!(votes.down_votes, 1);
    assert_eq!(votes.down_voters[0].name, "bob");

    record_vote(db.conn(), alice.id, target, VoteType::UnVoted).unwrap();
    let votes = find_votes(db.conn(), orders.id).unwrap();
    assert_eq!(votes.up_votes, 0);
    assert!(votes.up_voters.is_empty());
}

#[test]
fn votes_from_deleted_users_are_ignored() {
    let db = open();
    let alice = entity(&db, USER, "alice");
    let orders = entity(&db, TABLE, "shop.orders");
    record_vote(db.conn(), alice.id, RelationEnd::new(orders.id, TABLE), VoteType::VotedUp).unwrap();
    soft_delete_entity(db.conn(), alice.id).unwrap();
    assert_eq!(find_votes(db.conn(), orders.id).unwrap().up_votes, 0);
}

#[test]
fn extension_values_build_one_object() {
    let db = open();
    let orders = entity(&db, TABLE, "shop.orders");
    let table_type = EntityType::new(TABLE);
    assert_eq!(find_extension(db.conn(), orders.id, &table_type).unwrap(), None);

    set_extension_value(db.conn(), orders.id, &table_type, "sla", &json!("silver")).unwrap();
    set_extension_value(db.conn(), orders.id, &table_type, "sla", &json!("gold")).unwrap();
    set_extension_value(db.conn(), orders.id, &table_type, "retentionDays", &json!(30)).unwrap();
    let ext = find_extension(db.conn(), orders.id, &table_type).unwrap().unwrap();
    assert_eq!(ext, json!({"retentionDays": 30, "sla": "gold"}));

    // Values stored under another type's prefix are not part of this entity's extension.
    let other = EntityType::new("dashboard");
    set_extension_value(db.conn(), orders.id, &other, "stray", &json!(true)).unwrap();
    let ext = find_extension(db.conn(), orders.id, &table_type).unwrap().unwrap();
    assert!(ext.get("stray").is_none());

    remove_extension_value(db.conn(), orders.id, &table_type, "sla").unwrap();
    remove_extension_value(db.conn(), orders.id, &table_type, "retentionDays").unwrap();
    assert_eq!(find_extension(db.conn(), orders.id, &table_type).unwrap(), None);
}

// ── Seed ───────────────────────────────────────────────────────────────

const SEED: &str = r#"
entities:
  - type: table
    name: orders
    fqn: warehouse.shop.public.orders
    description: Customer orders
    parent: databaseSchema:warehouse.shop.public
  - type: databaseSchema
    name: public
    fqn: warehouse.shop.public
  - type: user
    name: alice
  - type: user
    name: mallory
    deleted: true
relationships:
  - from: user:alice
    to: table:warehouse.shop.public.orders
    relation: owns
  - from: user:mallory
    to: table:warehouse.shop.public.orders
    relation: follows
tags:
  - entity: table:warehouse.shop.public.orders
    tag: PII.Sensitive
votes:
  - user: alice
    entity: table:warehouse.shop.public.orders
    vote: votedUp
extensions:
  - entity: table:warehouse.shop.public.orders
    name: sla
    value: gold
"#;

#[test]
fn load_seed_writes_everything() {
    let db = open();
    let seed = CatalogSeed::from_yaml(SEED).unwrap();
    let summary = db.transaction(|conn| load_seed(conn, &seed)).unwrap();
    assert_eq!(
        summary,
        SeedSummary {
            entities: 4,
            relationships: 3,
            tags: 1,
            votes: 1,
            extensions: 1,
        }
    );

    let orders =
        get_entity_by_name(db.conn(), TABLE, "warehouse.shop.public.orders", Include::All).unwrap();
    assert_eq!(orders.description.as_deref(), Some("Customer orders"));
    let owns: BTreeSet<i32> = [Relationship::Owns.ordinal()].into_iter().collect();
    let owners = find_to_relations_batch(db.conn(), &[orders.id], &owns, Include::All).unwrap();
    assert_eq!(owners[0].related.name, "alice");

    let mallory = get_entity_by_name(db.conn(), USER, "mallory", Include::All).unwrap();
    assert!(mallory.deleted);
    assert_eq!(
        find_extension(db.conn(), orders.id, &EntityType::new(TABLE)).unwrap(),
        Some(json!({"sla": "gold"}))
    );
}

#[test]
fn load_seed_resolves_existing_entities() {
    let db = open();
    entity(&db, USER, "carol");
    let seed = CatalogSeed::from_yaml(
        "entities:\n  - type: dashboard\n    name: kpis\nrelationships:\n  - from: user:carol\n    to: dashboard:kpis\n    relation: owns\n",
    )
    .unwrap();
    let summary = load_seed(db.conn(), &seed).unwrap();
    assert_eq!(summary.relationships, 1);
}

#[test]
fn load_seed_rejects_bad_references() {
    let db = open();
    let unknown = CatalogSeed::from_yaml(
        "relationships:\n  - from: user:ghost\n    to: table:t\n    relation: owns\n",
    )
    .unwrap();
    let err = load_seed(db.conn(), &unknown).unwrap_err();
    assert!(err.to_string().contains("user:ghost"));

    let malformed = CatalogSeed::from_yaml("tags:\n  - entity: no-colon\n    tag: X\n").unwrap();
    assert!(load_seed(db.conn(), &malformed).is_err());
}

#[test]
fn load_seed_rejects_unknown_entity_type() {
    let db = open();
    let seed = CatalogSeed::from_yaml("entities:\n  - type: spaceship\n    name: x\n").unwrap();
    let err = load_seed(db.conn(), &seed).unwrap_err();
    assert!(err.to_string().contains("spaceship"));
}

#[test]
fn seed_rejects_unknown_keys() {
    assert!(CatalogSeed::from_yaml("models: []\n").is_err());
    assert!(CatalogSeed::from_yaml(
        "relationships:\n  - from: a:b\n    to: c:d\n    relation: likes\n"
    )
    .is_err());
}

#[test]
fn failed_seed_rolls_back() {
    let db = open();
    let seed = CatalogSeed::from_yaml(
        "entities:\n  - type: user\n    name: dave\nrelationships:\n  - from: user:dave\n    to: table:missing\n    relation: owns\n",
    )
    .unwrap();
    assert!(db.transaction(|conn| load_seed(conn, &seed)).is_err());
    assert_eq!(count(&db, "SELECT COUNT(*) FROM mc_meta.entities"), 0);
}
