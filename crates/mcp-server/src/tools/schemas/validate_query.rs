use hub_validator::ValidationError;
use rmcp::schemars;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ValidateQueryRequest {
    #[schemars(description = "GraphQL document to validate")]
    pub query: String,

    #[schemars(description = "Suggest corrections for unknown type names (default: true)")]
    pub suggest_fixes: Option<bool>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl From<&ValidationError> for ValidationIssue {
    fn from(error: &ValidationError) -> Self {
        Self {
            error_type: error.error_type.as_str().to_string(),
            message: error.message.clone(),
            type_name: error.type_name.clone(),
        }
    }
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct ValidateQueryResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationIssue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    pub estimated_complexity: usize,
    pub fields_requested: usize,
    /// False when the schema could not be loaded and only syntax was checked
    pub schema_checked: bool,
}
