use super::*;
use mc_core::{EntityType, Votes};
use serde_json::json;
use uuid::Uuid;

fn user(name: &str) -> EntityReference {
    EntityReference {
        id: Uuid::new_v4(),
        entity_type: EntityType::new("user"),
        name: name.to_string(),
        fully_qualified_name: name.to_string(),
        display_name: None,
        deleted: false,
    }
}

#[test]
fn unloaded_relation_is_none_not_empty() {
    let bundle = ReadBundle::new();
    let id = Uuid::new_v4();
    assert!(bundle.relations(id, "owners", Include::All).is_none());
    assert!(!bundle.has_loaded_relation_for_field(id, "owners"));
}

#[test]
fn loaded_empty_relation_is_some_empty() {
    let mut bundle = ReadBundle::new();
    let id = Uuid::new_v4();
    bundle.put_relations(id, "owners", Include::All, vec![]);
    assert_eq!(bundle.relations(id, "owners", Include::All), Some(&[][..]));
    assert!(bundle.has_loaded_relation_for_field(id, "owners"));
}

#[test]
fn last_write_wins() {
    let mut bundle = ReadBundle::new();
    let id = Uuid::new_v4();
    bundle.put_relations(id, "owners", Include::All, vec![user("alice")]);
    bundle.put_relations(id, "owners", Include::All, vec![user("bob")]);
    let owners = bundle.relations(id, "owners", Include::All).unwrap();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].name, "bob");
}

#[test]
fn include_is_part_of_the_key() {
    let mut bundle = ReadBundle::new();
    let id = Uuid::new_v4();
    bundle.put_relations(id, "owners", Include::NonDeleted, vec![user("alice")]);
    assert!(bundle.relations(id, "owners", Include::All).is_none());
    assert!(bundle.relations(id, "owners", Include::Deleted).is_none());

    bundle.put_relations(id, "owners", Include::Deleted, vec![]);
    let loaded: Vec<_> = bundle
        .loaded_includes_for_field(id, "owners")
        .into_iter()
        .collect();
    assert_eq!(loaded, vec![Include::Deleted, Include::NonDeleted]);
}

#[test]
fn entities_do_not_share_entries() {
    let mut bundle = ReadBundle::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    bundle.put_tags(a, vec![]);
    assert!(bundle.tags(a).is_some());
    assert!(bundle.tags(b).is_none());
}

#[test]
fn null_votes_store_zero_votes() {
    let mut bundle = ReadBundle::new();
    let id = Uuid::new_v4();
    assert!(bundle.votes(id).is_none());
    bundle.put_votes(id, None);
    let votes = bundle.votes(id).unwrap();
    assert_eq!(votes.up_votes, 0);
    assert_eq!(votes.down_votes, 0);
}

#[test]
fn extension_distinguishes_loaded_null() {
    let mut bundle = ReadBundle::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    assert!(!bundle.has_extension(a));
    assert_eq!(bundle.extension(a), None);

    bundle.put_extension(a, None);
    assert!(bundle.has_extension(a));
    assert_eq!(bundle.extension(a), Some(None));

    let value = json!({"sla": "gold"});
    bundle.put_extension(b, Some(value.clone()));
    assert_eq!(bundle.extension(b), Some(Some(&value)));
}

#[test]
fn evict_removes_only_one_entity() {
    let mut bundle = ReadBundle::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    bundle.put_relations(a, "owners", Include::All, vec![]);
    bundle.put_votes(a, None);
    bundle.put_reference(a, "parent", None);
    bundle.put_tags(b, vec![]);
    bundle.evict(a);
    assert!(!bundle.has_loaded_relation_for_field(a, "owners"));
    assert!(bundle.votes(a).is_none());
    assert!(!bundle.has_reference(a, "parent"));
    assert!(bundle.tags(b).is_some());
    assert!(!bundle.is_empty());
}

#[test]
fn evict_referencing_drops_values_that_list_the_entity() {
    let mut bundle = ReadBundle::new();
    let board = Uuid::new_v4();
    let other = Uuid::new_v4();
    let alice = user("alice");
    let bob = user("bob");
    bundle.put_relations(board, "owners", Include::NonDeleted, vec![alice.clone(), bob.clone()]);
    bundle.put_relations(board, "followers", Include::All, vec![bob.clone()]);
    bundle.put_votes(
        other,
        Some(Votes {
            up_votes: 1,
            up_voters: vec![alice.clone()],
            ..Votes::default()
        }),
    );
    bundle.put_reference(other, "parent", Some(alice.clone()));
    bundle.put_reference(board, "parent", None);
    bundle.put_tags(board, vec![]);

    bundle.evict_referencing(alice.id);
    assert!(bundle.relations(board, "owners", Include::NonDeleted).is_none());
    assert_eq!(bundle.relations(board, "followers", Include::All).unwrap().len(), 1);
    assert!(bundle.votes(other).is_none());
    assert!(!bundle.has_reference(other, "parent"));
    assert_eq!(bundle.reference(board, "parent"), Some(None));
    assert!(bundle.tags(board).is_some());
}
