use hub_schema::SchemaSnapshot;

/// Type lookups the validator needs from a loaded schema
pub trait TypeCatalog {
    fn has_type(&self, name: &str) -> bool;

    /// "Did you mean" candidates for an unknown type name, closest first
    fn similar_types(&self, name: &str) -> Vec<String>;
}

impl TypeCatalog for SchemaSnapshot {
    fn has_type(&self, name: &str) -> bool {
        self.contains(name)
    }

    fn similar_types(&self, name: &str) -> Vec<String> {
        hub_search::find_similar_names(name, self.type_names())
    }
}
