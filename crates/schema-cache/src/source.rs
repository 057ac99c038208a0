use async_trait::async_trait;
use hub_client::GraphQLExecutor;
use serde_json::Value;

/// Where introspection results come from
#[async_trait]
pub trait IntrospectionSource: Send + Sync {
    /// Run `query` and return the response `data`
    async fn introspect(&self, query: &str) -> hub_client::Result<Value>;
}

#[async_trait]
impl IntrospectionSource for GraphQLExecutor {
    async fn introspect(&self, query: &str) -> hub_client::Result<Value> {
        GraphQLExecutor::introspect(self, query).await
    }
}
