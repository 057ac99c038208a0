use rmcp::schemars;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GraphqlQueryRequest {
    #[schemars(description = "GraphQL query document")]
    pub query: String,

    /// Object or JSON object string
    #[schemars(
        description = "Query variables as a JSON object or a JSON object string (e.g. {\"first\": 10})"
    )]
    pub variables: Option<serde_json::Value>,

    #[schemars(description = "Operation to run when the document defines several")]
    pub operation_name: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GraphqlMutateRequest {
    #[schemars(description = "GraphQL mutation document; must start with 'mutation'")]
    pub mutation: String,

    #[schemars(
        description = "Mutation variables as a JSON object or a JSON object string"
    )]
    pub variables: Option<serde_json::Value>,

    #[schemars(description = "Operation to run when the document defines several")]
    pub operation_name: Option<String>,

    #[schemars(
        description = "Must be true to run destructive mutations (delete, remove, destroy, drop, purge, clear)"
    )]
    pub confirm: Option<bool>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct GraphqlResult {
    pub success: bool,
    pub data: serde_json::Value,
    pub query_complexity: u64,
    pub retries: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
