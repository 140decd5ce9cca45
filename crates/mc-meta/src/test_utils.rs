//! Fixtures shared by the crate's unit tests.

use crate::populate::{add_relationship, insert_entity, RelationEnd};
use crate::MetaDb;
use mc_core::{Entity, EntityType, Relationship};

pub(crate) fn open() -> MetaDb {
    MetaDb::open_memory().unwrap()
}

/// Insert a live entity; its name is the last `.` segment of `fqn`.
pub(crate) fn entity(db: &MetaDb, entity_type: &str, fqn: &str) -> Entity {
    let name = fqn.rsplit('.').next().unwrap_or(fqn);
    let entity = Entity::new(EntityType::new(entity_type), name, fqn);
    insert_entity(db.conn(), &entity).unwrap();
    entity
}

pub(crate) fn relate(db: &MetaDb, from: &Entity, to: &Entity, relation: Relationship) {
    add_relationship(
        db.conn(),
        RelationEnd::new(from.id, &from.entity_type),
        RelationEnd::new(to.id, &to.entity_type),
        relation,
        None,
    )
    .unwrap();
}
