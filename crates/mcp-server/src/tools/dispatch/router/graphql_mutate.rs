use super::super::{CallToolResult, GraphqlMutateRequest, HubService, McpError};
use hub_protocol::{ErrorEnvelope, ToolNextAction};
use serde_json::json;

use super::error::{invalid_request, tool_error_envelope, validation_failed};
use super::graphql_query::{build_request, execute, parse_variables};

const DESTRUCTIVE_KEYWORDS: &[&str] = &["delete", "remove", "destroy", "drop", "purge", "clear"];

/// Guarded mutation execution; destructive documents need `confirm=true`.
pub(in crate::tools::dispatch) async fn graphql_mutate(
    service: &HubService,
    request: GraphqlMutateRequest,
) -> Result<CallToolResult, McpError> {
    if is_destructive(&request.mutation) && !request.confirm.unwrap_or(false) {
        return Ok(confirmation_required(&request.mutation));
    }

    let variables = match parse_variables(request.variables) {
        Ok(variables) => variables,
        Err(message) => return Ok(invalid_request(message)),
    };

    let checked = service
        .schema()
        .validate_mutation(&request.mutation, true)
        .await;
    if !checked.valid {
        return Ok(validation_failed(&checked));
    }

    log::info!("Executing mutation");
    let upstream = build_request(request.mutation, variables, request.operation_name);
    Ok(execute(service, &upstream, Some("Mutation executed successfully")).await)
}

fn is_destructive(mutation: &str) -> bool {
    let lowered = mutation.to_lowercase();
    DESTRUCTIVE_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

fn confirmation_required(mutation: &str) -> CallToolResult {
    tool_error_envelope(
        ErrorEnvelope::new(
            "CONFIRMATION_REQUIRED",
            "This mutation appears to be destructive (contains delete/remove/destroy). \
             Please set confirm=true to proceed. \
             Make sure you understand the impact of this operation.",
        )
        .with_hint("Review the mutation, then resend it with confirm=true.")
        .with_next_action(ToolNextAction {
            tool: "graphql_mutate".to_string(),
            args: json!({ "mutation": mutation, "confirm": true }),
            reason: "Run the mutation once its impact is understood.".to_string(),
        }),
    )
}
