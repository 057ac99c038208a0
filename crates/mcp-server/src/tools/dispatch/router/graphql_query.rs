use super::super::{CallToolResult, Content, GraphqlQueryRequest, HubService, McpError};
use crate::tools::schemas::graphql::GraphqlResult;
use hub_client::GraphQLRequest;
use serde_json::{Map, Value};

use super::error::{client_error, invalid_request, validation_failed};

/// Validate against the cached schema, then execute upstream.
pub(in crate::tools::dispatch) async fn graphql_query(
    service: &HubService,
    request: GraphqlQueryRequest,
) -> Result<CallToolResult, McpError> {
    let variables = match parse_variables(request.variables) {
        Ok(variables) => variables,
        Err(message) => return Ok(invalid_request(message)),
    };

    let checked = service.schema().validate_query(&request.query, true).await;
    if !checked.valid {
        return Ok(validation_failed(&checked));
    }

    let upstream = build_request(request.query, variables, request.operation_name);
    Ok(execute(service, &upstream, None).await)
}

/// Accepts an object, a JSON object string, or nothing
pub(super) fn parse_variables(raw: Option<Value>) -> Result<Option<Map<String, Value>>, String> {
    let value = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(text)) if text.trim().is_empty() => return Ok(None),
        Some(Value::String(text)) => serde_json::from_str::<Value>(&text)
            .map_err(|e| format!("Invalid variables JSON: {e}"))?,
        Some(value) => value,
    };

    match value {
        Value::Object(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        other => Err(format!(
            "Invalid variables JSON: expected an object, got {}",
            json_kind(&other)
        )),
    }
}

pub(super) fn build_request(
    document: String,
    variables: Option<Map<String, Value>>,
    operation_name: Option<String>,
) -> GraphQLRequest {
    let mut request = GraphQLRequest::new(document);
    if let Some(variables) = variables {
        request = request.with_variables(variables);
    }
    if let Some(name) = operation_name.filter(|n| !n.trim().is_empty()) {
        request = request.with_operation_name(name);
    }
    request
}

pub(super) async fn execute(
    service: &HubService,
    request: &GraphQLRequest,
    message: Option<&str>,
) -> CallToolResult {
    match service.executor().execute(request).await {
        Ok(outcome) => {
            let result = GraphqlResult {
                success: true,
                query_complexity: outcome.response.query_complexity(),
                data: outcome
                    .response
                    .data
                    .unwrap_or_else(|| Value::Object(Map::new())),
                retries: outcome.retries,
                message: message.map(str::to_string),
            };
            CallToolResult::success(vec![Content::text(
                hub_protocol::serialize_json(&result).unwrap_or_default(),
            )])
        }
        Err(e) => {
            log::warn!("GraphQL execution failed: {e}");
            client_error(&e)
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
