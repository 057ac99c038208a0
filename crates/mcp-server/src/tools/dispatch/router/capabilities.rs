use super::super::{CallToolResult, CapabilitiesRequest, Content, HubService, McpError};
use crate::tools::catalog;
use crate::tools::schemas::capabilities::CapabilitiesResult;
use hub_client::INTROSPECTION_QUERY_VERSION;
use hub_graph::{DEFAULT_PATH_DEPTH, MAX_PATHS, MAX_PATH_DEPTH};
use hub_protocol::{
    Capabilities, CapabilitiesServer, DefaultLimits, ToolNextAction, CAPABILITIES_SCHEMA_VERSION,
};
use hub_search::{MAX_SEARCH_RESULTS, MAX_SUGGESTIONS};
use serde_json::json;

/// Return tool capabilities and default limits for self-directed clients.
pub(in crate::tools::dispatch) async fn capabilities(
    service: &HubService,
    _request: CapabilitiesRequest,
) -> Result<CallToolResult, McpError> {
    let start_route = ToolNextAction {
        tool: "explore_schema".to_string(),
        args: json!({ "domain": "TAS", "category": "OBJECT" }),
        reason: "Browse entity types of one domain before building queries.".to_string(),
    };

    let output = Capabilities {
        schema_version: CAPABILITIES_SCHEMA_VERSION,
        server: CapabilitiesServer {
            name: catalog::SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        tools: catalog::TOOL_NAMES.iter().map(|name| name.to_string()).collect(),
        introspection_query_version: INTROSPECTION_QUERY_VERSION,
        default_limits: DefaultLimits {
            path_depth: DEFAULT_PATH_DEPTH,
            max_path_depth: MAX_PATH_DEPTH,
            max_paths: MAX_PATHS,
            max_suggestions: MAX_SUGGESTIONS,
            max_search_results: MAX_SEARCH_RESULTS,
        },
        start_route,
    };

    let result = CapabilitiesResult {
        capabilities: output,
        schema_loaded: service.schema().store().current().await.is_some(),
    };

    Ok(CallToolResult::success(vec![Content::text(
        hub_protocol::serialize_json(&result).unwrap_or_default(),
    )]))
}
