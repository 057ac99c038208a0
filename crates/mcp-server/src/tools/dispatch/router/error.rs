use super::super::{CallToolResult, Content};
use hub_client::ClientError;
use hub_protocol::{ErrorEnvelope, ToolNextAction};
use hub_schema_cache::StoreError;
use hub_validator::ValidationResult;
use serde_json::json;

use crate::tools::schemas::validate_query::ValidationIssue;

pub(super) fn tool_error_envelope(error: ErrorEnvelope) -> CallToolResult {
    let mut result = CallToolResult::error(vec![Content::text(error.message.clone())]);
    result.structured_content = Some(json!({ "error": error }));
    result
}

pub(super) fn tool_error(code: &str, message: impl Into<String>) -> CallToolResult {
    tool_error_envelope(ErrorEnvelope::new(code, message))
}

pub(super) fn invalid_request(message: impl Into<String>) -> CallToolResult {
    tool_error("invalid_request", message)
}

pub(super) fn unknown_type(name: &str, suggestions: Vec<String>) -> CallToolResult {
    let message = if suggestions.is_empty() {
        format!("Type '{name}' not found.")
    } else {
        format!(
            "Type '{name}' not found. Did you mean: {}?",
            suggestions.join(", ")
        )
    };
    tool_error_envelope(
        ErrorEnvelope::new("UNKNOWN_TYPE", message)
            .with_details(json!({ "suggestions": suggestions }))
            .with_next_action(ToolNextAction {
                tool: "explore_schema".to_string(),
                args: json!({ "search": name }),
                reason: "Search for types with a similar name.".to_string(),
            }),
    )
}

pub(super) fn schema_unavailable(error: &StoreError) -> CallToolResult {
    tool_error_envelope(
        ErrorEnvelope::new(error.code(), error.to_string())
            .with_hint("Check the upstream URL and token, then retry.")
            .with_next_action(ToolNextAction {
                tool: "refresh_schema".to_string(),
                args: json!({}),
                reason: "Reload the schema once the upstream is reachable.".to_string(),
            }),
    )
}

pub(super) fn client_error(error: &ClientError) -> CallToolResult {
    let envelope = ErrorEnvelope::new(error.code(), error.to_string());
    let envelope = match error {
        ClientError::GraphQl { errors } => envelope.with_details(json!({ "errors": errors })),
        ClientError::Upstream { status, body } => {
            envelope.with_details(json!({ "status": status, "body": body }))
        }
        _ => envelope,
    };
    tool_error_envelope(envelope)
}

/// Rejected before execution; carries every validation error
pub(super) fn validation_failed(result: &ValidationResult) -> CallToolResult {
    let code = result
        .errors
        .first()
        .map_or("SYNTAX_ERROR", |e| e.error_type.as_str());
    let issues: Vec<ValidationIssue> = result.errors.iter().map(ValidationIssue::from).collect();
    let mut envelope = ErrorEnvelope::new(
        code,
        format!("Query validation failed: {}", result.error_summary()),
    )
    .with_details(json!({ "errors": issues, "suggestions": result.suggestions }))
    .with_next_action(ToolNextAction {
        tool: "validate_query".to_string(),
        args: json!({ "suggest_fixes": true }),
        reason: "Check the corrected query before running it again.".to_string(),
    });
    if let Some(first) = result.suggestions.first() {
        envelope = envelope.with_hint(first.clone());
    }
    tool_error_envelope(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn structured_error(result: &CallToolResult) -> serde_json::Value {
        result
            .structured_content
            .as_ref()
            .and_then(|v| v.get("error"))
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_unknown_type_message() {
        let result = unknown_type("Entity_Foo", vec!["Entity_Food".to_string()]);
        assert_eq!(result.is_error, Some(true));
        let error = structured_error(&result);
        assert_eq!(error["code"], "UNKNOWN_TYPE");
        assert_eq!(
            error["message"],
            "Type 'Entity_Foo' not found. Did you mean: Entity_Food?"
        );

        let bare = structured_error(&unknown_type("Nope", Vec::new()));
        assert_eq!(bare["message"], "Type 'Nope' not found.");
    }

    #[test]
    fn test_client_error_details() {
        let error = structured_error(&client_error(&ClientError::Upstream {
            status: 404,
            body: "missing".to_string(),
        }));
        assert_eq!(error["code"], "UPSTREAM_ERROR");
        assert_eq!(error["details"]["status"], 404);
        assert_eq!(error["details"]["body"], "missing");
        assert_eq!(error["message"], "GraphQL API error: HTTP 404");
    }
}
