use super::*;
use mc_core::entity_type::{DASHBOARD, TABLE};
use mc_core::EntityType;

fn orders() -> Entity {
    Entity::new(EntityType::new(TABLE), "orders", "shop.public.orders")
}

#[test]
fn miss_then_hit_by_id() {
    let entity = orders();
    let fields = Fields::new(["owners"]);
    assert!(RequestEntityCache::get_by_id(TABLE, entity.id, &fields, Include::All, None)
        .unwrap()
        .is_none());

    RequestEntityCache::put_by_id(&entity, &fields, Include::All, None).unwrap();
    let hit = RequestEntityCache::get_by_id(TABLE, entity.id, &fields, Include::All, None)
        .unwrap()
        .unwrap();
    assert_eq!(hit, entity);
}

#[test]
fn returned_copies_are_independent() {
    let mut entity = orders();
    let fields = Fields::empty();
    RequestEntityCache::put_by_name(&entity, &fields, Include::All, None).unwrap();

    entity.description = Some("changed after put".to_string());
    let mut first = RequestEntityCache::get_by_name(TABLE, "shop.public.orders", &fields, Include::All, None)
        .unwrap()
        .unwrap();
    assert!(first.description.is_none());

    first.name = "mutated".to_string();
    let second = RequestEntityCache::get_by_name(TABLE, "shop.public.orders", &fields, Include::All, None)
        .unwrap()
        .unwrap();
    assert_eq!(second.name, "orders");
}

#[test]
fn key_covers_fields_includes_and_type() {
    let entity = orders();
    let owners = Fields::new(["owners"]);
    let includes = RelationIncludes::from_include(Some(Include::NonDeleted));
    RequestEntityCache::put_by_id(&entity, &owners, Include::All, Some(&includes)).unwrap();

    let get = |ty: &str, fields: &Fields, include, rel: Option<&RelationIncludes>| {
        RequestEntityCache::get_by_id(ty, entity.id, fields, include, rel)
            .unwrap()
            .is_some()
    };
    assert!(get(TABLE, &owners, Include::All, Some(&includes)));
    assert!(!get(TABLE, &Fields::new(["owners", "tags"]), Include::All, Some(&includes)));
    assert!(!get(TABLE, &owners, Include::NonDeleted, Some(&includes)));
    assert!(!get(TABLE, &owners, Include::All, None));
    assert!(!get(
        TABLE,
        &owners,
        Include::All,
        Some(&includes.clone().with_field("owners", Include::All))
    ));
    assert!(!get(DASHBOARD, &owners, Include::All, Some(&includes)));
}

#[test]
fn missing_relation_includes_keys_as_all() {
    let entity = orders();
    let fields = Fields::empty();
    RequestEntityCache::put_by_id(&entity, &fields, Include::All, None).unwrap();
    let explicit_all = RelationIncludes::from_include(Some(Include::All));
    assert!(
        RequestEntityCache::get_by_id(TABLE, entity.id, &fields, Include::All, Some(&explicit_all))
            .unwrap()
            .is_some()
    );
}

#[test]
fn invalidate_by_id_drops_name_entries_too() {
    let entity = orders();
    let fields = Fields::empty();
    RequestEntityCache::put_by_id(&entity, &fields, Include::All, None).unwrap();
    RequestEntityCache::put_by_name(&entity, &fields, Include::All, None).unwrap();
    let other = Entity::new(EntityType::new(TABLE), "customers", "shop.public.customers");
    RequestEntityCache::put_by_id(&other, &fields, Include::All, None).unwrap();
    assert_eq!(RequestEntityCache::len(), 3);

    RequestEntityCache::invalidate(TABLE, Some(entity.id), None);
    assert_eq!(RequestEntityCache::len(), 1);
    assert!(RequestEntityCache::get_by_id(TABLE, other.id, &fields, Include::All, None)
        .unwrap()
        .is_some());
}

#[test]
fn invalidate_ignores_other_types() {
    let entity = orders();
    RequestEntityCache::put_by_id(&entity, &Fields::empty(), Include::All, None).unwrap();
    RequestEntityCache::invalidate(DASHBOARD, Some(entity.id), Some("shop.public.orders"));
    assert_eq!(RequestEntityCache::len(), 1);
    RequestEntityCache::invalidate(TABLE, None, Some("shop.public.orders"));
    assert!(RequestEntityCache::is_empty());
}

#[test]
fn invalidate_referencing_drops_documents_mentioning_id() {
    let owner = Entity::new(EntityType::new("user"), "alice", "alice");
    let mut table = orders();
    table.owners = Some(vec![owner.entity_reference()]);
    RequestEntityCache::put_by_id(&table, &Fields::new(["owners"]), Include::All, None).unwrap();
    RequestEntityCache::invalidate_referencing(owner.id);
    assert!(RequestEntityCache::is_empty());
}

#[test]
fn cache_is_per_thread() {
    let entity = orders();
    RequestEntityCache::put_by_id(&entity, &Fields::empty(), Include::All, None).unwrap();
    let id = entity.id;
    let seen_elsewhere = std::thread::spawn(move || {
        RequestEntityCache::get_by_id(TABLE, id, &Fields::empty(), Include::All, None)
            .unwrap()
            .is_some()
    })
    .join()
    .unwrap();
    assert!(!seen_elsewhere);
    RequestEntityCache::clear();
    assert!(RequestEntityCache::is_empty());
}
