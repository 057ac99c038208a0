use hub_graph::RelationshipGraph;
use hub_schema::{SchemaSnapshot, TypeDefinition};
use hub_search::find_similar_names;
use hub_validator::TypeCatalog;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant, SystemTime};

/// One loaded schema with everything derived from it.
///
/// Built once per load and never modified afterwards, apart from the suggestion memo, which
/// only caches pure functions of the snapshot.
#[derive(Debug)]
pub struct CachedSchema {
    snapshot: SchemaSnapshot,
    graph: RelationshipGraph,
    generation: u64,
    loaded: Instant,
    suggestions: Mutex<LruCache<String, Vec<String>>>,
}

impl CachedSchema {
    pub fn new(
        snapshot: SchemaSnapshot,
        graph: RelationshipGraph,
        generation: u64,
        memo_size: usize,
    ) -> Self {
        let capacity = NonZeroUsize::new(memo_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            snapshot,
            graph,
            generation,
            loaded: Instant::now(),
            suggestions: Mutex::new(LruCache::new(capacity)),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &SchemaSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn graph(&self) -> &RelationshipGraph {
        &self.graph
    }

    /// Increases by one with every successful load of the owning store
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn loaded_at(&self) -> SystemTime {
        self.snapshot.loaded_at()
    }

    #[must_use]
    pub fn age(&self) -> Duration {
        self.loaded.elapsed()
    }

    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() >= ttl
    }

    #[must_use]
    pub fn type_details(&self, name: &str) -> Option<&TypeDefinition> {
        self.snapshot.get_type(name)
    }

    /// Type names close to `name`, memoized per schema
    pub fn similar_types(&self, name: &str) -> Vec<String> {
        if let Some(hit) = self.memo().get(name) {
            return hit.clone();
        }

        let computed = find_similar_names(name, self.snapshot.type_names());
        self.memo().put(name.to_string(), computed.clone());
        computed
    }

    /// Field names of `parent` close to `field`; empty when the parent type is unknown
    #[must_use]
    pub fn similar_fields(&self, parent: &str, field: &str) -> Vec<String> {
        self.snapshot.get_type(parent).map_or_else(Vec::new, |ty| {
            find_similar_names(field, ty.fields.iter().map(|f| f.name.as_str()))
        })
    }

    fn memo(&self) -> MutexGuard<'_, LruCache<String, Vec<String>>> {
        self.suggestions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl TypeCatalog for CachedSchema {
    fn has_type(&self, name: &str) -> bool {
        self.snapshot.contains(name)
    }

    fn similar_types(&self, name: &str) -> Vec<String> {
        CachedSchema::similar_types(self, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_schema::{RootTypes, TypeKind, TypeReference};

    fn cached(memo_size: usize) -> CachedSchema {
        let string = TypeReference::named(TypeKind::Scalar, "String");
        let types = vec![
            TypeDefinition::new("Foundation", TypeKind::Object)
                .with_field("name", string.clone())
                .with_field("version", string),
            TypeDefinition::new("Organization", TypeKind::Object),
        ];
        let snapshot = SchemaSnapshot::new(types, RootTypes::default(), SystemTime::now());
        CachedSchema::new(snapshot, RelationshipGraph::new(), 1, memo_size)
    }

    #[test]
    fn test_similar_types_are_memoized() {
        let schema = cached(1);
        assert_eq!(schema.similar_types("foundaton"), ["Foundation"]);
        assert_eq!(schema.memo().len(), 1);

        assert_eq!(schema.similar_types("foundaton"), ["Foundation"]);
        assert!(schema.similar_types("zzzzzzzzzz").is_empty());
        // capacity 1: the older entry was evicted
        assert_eq!(schema.memo().len(), 1);
        assert!(schema.memo().peek("foundaton").is_none());
    }

    #[test]
    fn test_similar_fields() {
        let schema = cached(10);
        assert_eq!(schema.similar_fields("Foundation", "nam"), ["name"]);
        assert!(schema.similar_fields("Nope", "name").is_empty());
    }

    #[test]
    fn test_zero_memo_size_still_works() {
        let schema = cached(0);
        assert_eq!(schema.similar_types("Organisation"), ["Organization"]);
        assert!(!schema.is_expired(Duration::from_secs(60)));
        assert!(schema.is_expired(Duration::ZERO));
    }
}
