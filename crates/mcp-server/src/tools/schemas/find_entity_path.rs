use rmcp::schemars;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FindEntityPathRequest {
    #[schemars(
        description = "Starting entity type, including the _Type suffix (e.g. Entity_Tanzu_TAS_Application_Type)"
    )]
    pub from_type: String,

    #[schemars(
        description = "Target entity type, including the _Type suffix (e.g. Entity_Tanzu_TAS_Foundation_Type)"
    )]
    pub to_type: String,

    #[schemars(description = "Maximum traversal depth (default: 3, max: 5)")]
    pub max_depth: Option<usize>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct EntityPath {
    pub path_number: usize,
    pub steps: usize,
    /// Start type followed by one `--[field]--> Target` line per hop
    pub traversal: Vec<String>,
    pub query_template: String,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct FindEntityPathResult {
    pub from_type: String,
    pub to_type: String,
    pub max_depth: usize,
    pub paths_found: usize,
    pub paths: Vec<EntityPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}
