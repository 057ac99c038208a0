use super::super::{CallToolResult, Content, HubService, McpError, RefreshSchemaRequest};
use crate::tools::schemas::refresh_schema::RefreshSchemaResult;
use std::time::Instant;

use super::error::schema_unavailable;

/// Force a reload; the previous schema stays in place if it fails.
pub(in crate::tools::dispatch) async fn refresh_schema(
    service: &HubService,
    _request: RefreshSchemaRequest,
) -> Result<CallToolResult, McpError> {
    let started = Instant::now();
    let schema = match service.schema().refresh_schema().await {
        Ok(schema) => schema,
        Err(e) => return Ok(schema_unavailable(&e)),
    };

    let result = RefreshSchemaResult {
        success: true,
        generation: schema.generation(),
        type_count: schema.snapshot().len(),
        entity_count: schema.graph().entity_count(),
        relationship_count: schema.graph().relationship_count(),
        duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    };

    Ok(CallToolResult::success(vec![Content::text(
        hub_protocol::serialize_json(&result).unwrap_or_default(),
    )]))
}
