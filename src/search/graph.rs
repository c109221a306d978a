//! Relation graph lookup used by the cross-entity expansion

use crate::campaign::EntityType;
use serde::Serialize;

/// An entity one relation hop away
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Neighbor {
    pub id: i64,
    pub name: Option<String>,
    pub entity_type: EntityType,
}

/// Synchronous one-hop neighbor lookup over already loaded data
pub trait RelationGraph {
    /// Entities related to `entity_id` in either direction, deduplicated
    fn neighbors(&self, entity_id: i64) -> Vec<Neighbor>;
}

impl<G: RelationGraph + ?Sized> RelationGraph for &G {
    fn neighbors(&self, entity_id: i64) -> Vec<Neighbor> {
        (**self).neighbors(entity_id)
    }
}
