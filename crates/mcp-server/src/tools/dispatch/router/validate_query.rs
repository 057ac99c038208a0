use super::super::{CallToolResult, Content, HubService, McpError, ValidateQueryRequest};
use crate::tools::schemas::validate_query::{ValidateQueryResult, ValidationIssue};

/// Offline validation; an invalid query is a successful tool call with `valid: false`.
pub(in crate::tools::dispatch) async fn validate_query(
    service: &HubService,
    request: ValidateQueryRequest,
) -> Result<CallToolResult, McpError> {
    let suggest_fixes = request.suggest_fixes.unwrap_or(true);
    let checked = service
        .schema()
        .validate_query(&request.query, suggest_fixes)
        .await;
    let schema_checked = service.schema().store().current().await.is_some();

    let result = ValidateQueryResult {
        valid: checked.valid,
        message: checked
            .valid
            .then(|| "Query is valid and ready to execute".to_string()),
        errors: checked.errors.iter().map(ValidationIssue::from).collect(),
        suggestions: checked.suggestions,
        estimated_complexity: checked.estimated_complexity,
        fields_requested: checked.field_count,
        schema_checked,
    };

    Ok(CallToolResult::success(vec![Content::text(
        hub_protocol::serialize_json(&result).unwrap_or_default(),
    )]))
}
