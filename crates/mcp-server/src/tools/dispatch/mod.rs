mod router;

use super::catalog;
use super::schemas::capabilities::CapabilitiesRequest;
use super::schemas::explore_schema::ExploreSchemaRequest;
use super::schemas::find_entity_path::FindEntityPathRequest;
use super::schemas::graphql::{GraphqlMutateRequest, GraphqlQueryRequest};
use super::schemas::refresh_schema::RefreshSchemaRequest;
use super::schemas::validate_query::ValidateQueryRequest;
use hub_client::GraphQLExecutor;
use hub_schema_cache::SchemaService;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo, Tool};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use std::sync::Arc;

/// MCP service for the GraphQL schema hub
#[derive(Clone)]
pub struct HubService {
    schema: SchemaService,
    executor: Arc<GraphQLExecutor>,
    tool_router: ToolRouter<Self>,
}

impl HubService {
    pub fn new(schema: SchemaService, executor: Arc<GraphQLExecutor>) -> Self {
        Self {
            schema,
            executor,
            tool_router: Self::tool_router(),
        }
    }

    /// Every tool this service registers, in registration order
    pub fn tools() -> Vec<Tool> {
        Self::tool_router().list_all()
    }

    pub(crate) fn schema(&self) -> &SchemaService {
        &self.schema
    }

    pub(crate) fn executor(&self) -> &GraphQLExecutor {
        &self.executor
    }
}

#[tool_router]
impl HubService {
    /// Type details or a filtered type list.
    #[tool(
        description = "Explore the GraphQL schema. With type_name, returns fields (SDL types, arguments), enum values, interfaces and an example query for entity types. Otherwise lists up to 20 types filtered by search term, domain and category."
    )]
    pub async fn explore_schema(
        &self,
        Parameters(request): Parameters<ExploreSchemaRequest>,
    ) -> Result<CallToolResult, McpError> {
        router::explore_schema::explore_schema(self, request).await
    }

    /// Relationship paths between two entity types.
    #[tool(
        description = "Find relationship paths between two entity types (breadth-first, up to 5 paths, max depth 5). Each path comes with traversal steps and a nested query template."
    )]
    pub async fn find_entity_path(
        &self,
        Parameters(request): Parameters<FindEntityPathRequest>,
    ) -> Result<CallToolResult, McpError> {
        router::find_entity_path::find_entity_path(self, request).await
    }

    #[tool(
        description = "Validate a GraphQL query without sending it: delimiter balance, operation keyword, unknown type names with suggestions, and an approximate complexity score."
    )]
    pub async fn validate_query(
        &self,
        Parameters(request): Parameters<ValidateQueryRequest>,
    ) -> Result<CallToolResult, McpError> {
        router::validate_query::validate_query(self, request).await
    }

    /// Validated, retried query execution.
    #[tool(
        description = "Execute a read-only GraphQL query against the upstream API. The query is validated first; transient upstream failures are retried with exponential backoff."
    )]
    pub async fn graphql_query(
        &self,
        Parameters(request): Parameters<GraphqlQueryRequest>,
    ) -> Result<CallToolResult, McpError> {
        router::graphql_query::graphql_query(self, request).await
    }

    #[tool(
        description = "Execute a GraphQL mutation. Destructive mutations (delete, remove, destroy, drop, purge, clear) are refused unless confirm=true."
    )]
    pub async fn graphql_mutate(
        &self,
        Parameters(request): Parameters<GraphqlMutateRequest>,
    ) -> Result<CallToolResult, McpError> {
        router::graphql_mutate::graphql_mutate(self, request).await
    }

    #[tool(
        description = "Reload the GraphQL schema from the upstream API and rebuild the relationship graph."
    )]
    pub async fn refresh_schema(
        &self,
        Parameters(request): Parameters<RefreshSchemaRequest>,
    ) -> Result<CallToolResult, McpError> {
        router::refresh_schema::refresh_schema(self, request).await
    }

    /// Server info and default limits for self-directed clients.
    #[tool(description = "Server version, available tools and default limits. Start here.")]
    pub async fn capabilities(
        &self,
        Parameters(request): Parameters<CapabilitiesRequest>,
    ) -> Result<CallToolResult, McpError> {
        router::capabilities::capabilities(self, request).await
    }
}

#[tool_handler]
impl ServerHandler for HubService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(catalog::INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_registered_tools_match_catalog() {
        let mut registered: Vec<String> = HubService::tools()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        registered.sort();

        let mut listed: Vec<String> = catalog::TOOL_NAMES.iter().map(|s| s.to_string()).collect();
        listed.sort();

        assert_eq!(registered, listed);
    }
}
