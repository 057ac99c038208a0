use crate::graph::RelationshipGraph;
use crate::naming::NamingConvention;
use crate::types::{Direction, EntityRelationship};
use hub_schema::{SchemaSnapshot, TypeDefinition, TypeReference};

/// Build the relationship graph from a schema snapshot
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraphBuilder {
    naming: NamingConvention,
}

impl RelationshipGraphBuilder {
    #[must_use]
    pub fn new(naming: NamingConvention) -> Self {
        Self { naming }
    }

    #[must_use]
    pub fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    /// Derive outbound relationships for every entity type.
    ///
    /// Convention violations (missing container types, undecodable target names) drop the
    /// affected edge and are only logged.
    #[must_use]
    pub fn build(&self, schema: &SchemaSnapshot) -> RelationshipGraph {
        let mut graph = RelationshipGraph::new();

        let entities: Vec<&TypeDefinition> = schema
            .types()
            .iter()
            .filter(|t| self.naming.is_entity_type(&t.name))
            .collect();

        log::debug!(
            "Building relationship graph for {} entity types",
            entities.len()
        );

        for entity in entities {
            let mut relationships = Vec::new();

            for field in &entity.fields {
                let direction = if field.name == self.naming.incoming_field {
                    Direction::In
                } else if field.name == self.naming.outgoing_field {
                    Direction::Out
                } else {
                    continue;
                };

                let container = field.ty.named_type();
                log::debug!(
                    "Entity {} has {} field pointing to type: {container}",
                    entity.name,
                    field.name
                );
                relationships.extend(self.extract_relationships(
                    schema,
                    &entity.name,
                    &field.name,
                    container,
                    direction,
                ));
            }

            if !relationships.is_empty() {
                log::debug!(
                    "Entity {} has {} relationships",
                    entity.name,
                    relationships.len()
                );
                graph.insert(entity.name.clone(), relationships);
            }
        }

        log::info!(
            "Built relationship graph: {} entities, {} relationships",
            graph.entity_count(),
            graph.relationship_count()
        );

        graph
    }

    /// Each field of the container type is one relationship kind
    fn extract_relationships(
        &self,
        schema: &SchemaSnapshot,
        source: &str,
        container_field: &str,
        container_type: &str,
        direction: Direction,
    ) -> Vec<EntityRelationship> {
        let Some(container) = schema.get_type(container_type) else {
            log::warn!("Relationship type {container_type} not found in schema for entity {source}");
            return Vec::new();
        };

        if container.fields.is_empty() {
            log::warn!("Relationship type {container_type} has no fields");
            return Vec::new();
        }

        container
            .fields
            .iter()
            .filter_map(|kind_field| {
                let Some(target) = self.resolve_target(schema, &kind_field.ty) else {
                    log::debug!(
                        "Could not extract target entity for relationship field: {}",
                        kind_field.name
                    );
                    return None;
                };
                log::debug!("Found relationship: {source} --[{}]--> {target}", kind_field.name);
                Some(EntityRelationship {
                    source_entity: source.to_string(),
                    target_entity: target,
                    relationship_type: kind_field.name.clone(),
                    direction,
                    field_name: format!("{container_field}.{}", kind_field.name),
                })
            })
            .collect()
    }

    /// The relationship kind points at a second-level type whose field names are transliterated
    /// entity names; the first one that resolves wins.
    fn resolve_target(&self, schema: &SchemaSnapshot, ty: &TypeReference) -> Option<String> {
        let rel_type_name = ty.named_type();
        let Some(rel_type) = schema.get_type(rel_type_name) else {
            log::debug!("Relationship type '{rel_type_name}' not found in schema");
            return None;
        };

        rel_type.fields.iter().find_map(|field| {
            let candidate = self.naming.normalized_name_to_entity_name(&field.name)?;
            if schema.contains(&candidate) {
                Some(candidate)
            } else {
                log::debug!("Entity type '{candidate}' not found in schema");
                None
            }
        })
    }
}
