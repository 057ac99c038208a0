use crate::types::{Direction, EntityRelationship};
use std::collections::HashMap;

/// Outbound relationships per entity type.
///
/// Entities are kept in schema declaration order and each entity's relationships in field
/// declaration order, so every traversal over the graph is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipGraph {
    order: Vec<String>,
    edges: HashMap<String, Vec<EntityRelationship>>,
}

impl RelationshipGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the relationships of one entity. Entities without relationships are not stored.
    pub fn insert(&mut self, entity: impl Into<String>, relationships: Vec<EntityRelationship>) {
        if relationships.is_empty() {
            return;
        }
        let entity = entity.into();
        if !self.edges.contains_key(&entity) {
            self.order.push(entity.clone());
        }
        self.edges.insert(entity, relationships);
    }

    /// Outbound relationships of `entity`, empty when unknown
    #[must_use]
    pub fn relationships(&self, entity: &str) -> &[EntityRelationship] {
        self.edges.get(entity).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn relationships_in_direction(
        &self,
        entity: &str,
        direction: Direction,
    ) -> Vec<&EntityRelationship> {
        self.relationships(entity)
            .iter()
            .filter(|r| r.direction == direction)
            .collect()
    }

    #[must_use]
    pub fn contains(&self, entity: &str) -> bool {
        self.edges.contains_key(entity)
    }

    /// Entities with at least one relationship, in declaration order
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[EntityRelationship])> {
        self.order
            .iter()
            .map(|entity| (entity.as_str(), self.relationships(entity)))
    }

    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn relationship_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
