use hub_protocol::Capabilities;
use rmcp::schemars;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct CapabilitiesRequest {}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct CapabilitiesResult {
    #[serde(flatten)]
    pub capabilities: Capabilities,
    /// Whether a schema is currently loaded (no load is triggered)
    pub schema_loaded: bool,
}
