use rmcp::schemars;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct RefreshSchemaRequest {}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct RefreshSchemaResult {
    pub success: bool,
    pub generation: u64,
    pub type_count: usize,
    pub entity_count: usize,
    pub relationship_count: usize,
    pub duration_ms: u64,
}
