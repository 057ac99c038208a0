use crate::types::{TypeDefinition, TypeKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, SystemTime};

/// Root operation type names declared by the schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootTypes {
    pub query: Option<String>,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

/// Immutable, declaration-ordered view of every application type in a schema
#[derive(Debug, Clone)]
pub struct SchemaSnapshot {
    types: Vec<TypeDefinition>,
    index: HashMap<String, usize>,
    roots: RootTypes,
    loaded_at: SystemTime,
}

impl SchemaSnapshot {
    /// Build a snapshot. A repeated name replaces the earlier definition in place.
    #[must_use]
    pub fn new(types: Vec<TypeDefinition>, roots: RootTypes, loaded_at: SystemTime) -> Self {
        let mut ordered: Vec<TypeDefinition> = Vec::with_capacity(types.len());
        let mut index = HashMap::with_capacity(types.len());

        for ty in types {
            if let Some(&existing) = index.get(&ty.name) {
                log::debug!("Duplicate type definition '{}' replaces earlier entry", ty.name);
                ordered[existing] = ty;
            } else {
                index.insert(ty.name.clone(), ordered.len());
                ordered.push(ty);
            }
        }

        Self {
            types: ordered,
            index,
            roots,
            loaded_at,
        }
    }

    #[must_use]
    pub fn empty(loaded_at: SystemTime) -> Self {
        Self::new(Vec::new(), RootTypes::default(), loaded_at)
    }

    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.index.get(name).map(|&idx| &self.types[idx])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All types in declaration order
    #[must_use]
    pub fn types(&self) -> &[TypeDefinition] {
        &self.types
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.name.as_str())
    }

    #[must_use]
    pub fn types_by_kind(&self, kind: TypeKind) -> Vec<&TypeDefinition> {
        self.types.iter().filter(|t| t.kind == kind).collect()
    }

    #[must_use]
    pub fn types_by_prefix(&self, prefix: &str) -> Vec<&TypeDefinition> {
        self.types
            .iter()
            .filter(|t| t.name.starts_with(prefix))
            .collect()
    }

    #[must_use]
    pub const fn roots(&self) -> &RootTypes {
        &self.roots
    }

    #[must_use]
    pub const fn loaded_at(&self) -> SystemTime {
        self.loaded_at
    }

    /// Time since load; zero if the clock went backwards
    #[must_use]
    pub fn age(&self) -> Duration {
        SystemTime::now()
            .duration_since(self.loaded_at)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_and_declaration_order() {
        let snapshot = SchemaSnapshot::new(
            vec![
                TypeDefinition::new("Query", TypeKind::Object),
                TypeDefinition::new("Entity_Tanzu_TAS_Space_Type", TypeKind::Object),
                TypeDefinition::new("Severity", TypeKind::Enum),
            ],
            RootTypes::default(),
            SystemTime::now(),
        );

        assert_eq!(snapshot.len(), 3);
        assert!(snapshot.contains("Severity"));
        assert!(snapshot.get_type("Missing").is_none());
        let names: Vec<&str> = snapshot.type_names().collect();
        assert_eq!(names, ["Query", "Entity_Tanzu_TAS_Space_Type", "Severity"]);
        assert_eq!(snapshot.types_by_kind(TypeKind::Enum).len(), 1);
        assert_eq!(snapshot.types_by_prefix("Entity_").len(), 1);
    }

    #[test]
    fn test_duplicate_replaces_in_place() {
        let snapshot = SchemaSnapshot::new(
            vec![
                TypeDefinition::new("A", TypeKind::Object),
                TypeDefinition::new("B", TypeKind::Object),
                TypeDefinition::new("A", TypeKind::Object).with_description("second"),
            ],
            RootTypes::default(),
            SystemTime::now(),
        );

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.types()[0].description.as_deref(), Some("second"));
    }
}
