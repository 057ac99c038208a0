use crate::cached::CachedSchema;
use crate::error::Result;
use crate::store::SchemaStore;
use hub_graph::{RelationshipGraph, RelationshipPath};
use hub_schema::TypeDefinition;
use hub_search::{search_types, types_by_domain, Domain, TypeQuery};
use hub_validator::{QueryValidator, TypeCatalog, ValidationResult};
use std::sync::Arc;

/// Schema lookups used by the tool layer.
///
/// Every call works on one consistent snapshot obtained from the store.
#[derive(Debug, Clone)]
pub struct SchemaService {
    store: Arc<SchemaStore>,
}

impl SchemaService {
    pub fn new(store: Arc<SchemaStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<SchemaStore> {
        &self.store
    }

    pub async fn get_schema(&self) -> Result<Arc<CachedSchema>> {
        self.store.get_schema().await
    }

    pub async fn get_type_details(&self, name: &str) -> Result<Option<TypeDefinition>> {
        let schema = self.get_schema().await?;
        Ok(schema.type_details(name).cloned())
    }

    /// At most [`hub_search::MAX_SEARCH_RESULTS`] matches
    pub async fn search_types(
        &self,
        term: Option<&str>,
        domain: Option<&str>,
        kind: Option<&str>,
    ) -> Result<Vec<TypeDefinition>> {
        let schema = self.get_schema().await?;
        let query = TypeQuery { term, domain, kind };
        Ok(search_types(schema.snapshot(), &query)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn get_types_by_domain(&self, domain: Domain) -> Result<Vec<TypeDefinition>> {
        let schema = self.get_schema().await?;
        Ok(types_by_domain(schema.snapshot(), domain)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn get_entity_relationships(&self) -> Result<RelationshipGraph> {
        Ok(self.get_schema().await?.graph().clone())
    }

    pub async fn find_similar_types(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.get_schema().await?.similar_types(name))
    }

    pub async fn find_similar_fields(&self, parent: &str, field: &str) -> Result<Vec<String>> {
        Ok(self.get_schema().await?.similar_fields(parent, field))
    }

    pub async fn find_relationship_paths(
        &self,
        from: &str,
        to: &str,
        max_depth: usize,
    ) -> Result<Vec<RelationshipPath>> {
        let schema = self.get_schema().await?;
        Ok(schema.graph().find_paths(from, to, max_depth))
    }

    pub async fn refresh_schema(&self) -> Result<Arc<CachedSchema>> {
        self.store.refresh().await
    }

    /// Validate against the current schema; falls back to syntax-only checks when the schema
    /// cannot be loaded
    pub async fn validate_query(&self, text: &str, suggest_fixes: bool) -> ValidationResult {
        let validator = QueryValidator::default().with_suggestions(suggest_fixes);
        let schema = self.schema_for_validation().await;
        validator.validate(text, schema.as_deref().map(|s| s as &dyn TypeCatalog))
    }

    pub async fn validate_mutation(&self, text: &str, suggest_fixes: bool) -> ValidationResult {
        let validator = QueryValidator::default().with_suggestions(suggest_fixes);
        let schema = self.schema_for_validation().await;
        validator.validate_mutation(text, schema.as_deref().map(|s| s as &dyn TypeCatalog))
    }

    async fn schema_for_validation(&self) -> Option<Arc<CachedSchema>> {
        match self.get_schema().await {
            Ok(schema) => Some(schema),
            Err(e) => {
                log::warn!("Could not load schema for validation: {e}");
                None
            }
        }
    }
}
