use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body sent upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl GraphQLRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = Some(variables);
        self
    }

    #[must_use]
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLocation {
    pub line: u32,
    pub column: u32,
}

/// One entry of a response's `errors` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<ErrorLocation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
    #[serde(default)]
    pub extensions: Option<Map<String, Value>>,
}

impl GraphQLResponse {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }

    /// `extensions.queryComplexity`, 0 when absent or not a number
    #[must_use]
    pub fn query_complexity(&self) -> u64 {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.get("queryComplexity"))
            .and_then(|value| {
                value
                    .as_u64()
                    .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            })
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_uses_camel_case_and_skips_empty() {
        let request = GraphQLRequest::new("query Q { a }").with_operation_name("Q");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "query": "query Q { a }", "operationName": "Q" })
        );
    }

    #[test]
    fn test_query_complexity_from_extensions() {
        let response: GraphQLResponse = serde_json::from_value(json!({
            "data": { "a": 1 },
            "extensions": { "queryComplexity": 42 }
        }))
        .unwrap();
        assert_eq!(response.query_complexity(), 42);
        assert!(!response.has_errors());

        assert_eq!(GraphQLResponse::default().query_complexity(), 0);
    }

    #[test]
    fn test_errors_tolerate_unknown_fields() {
        let response: GraphQLResponse = serde_json::from_value(json!({
            "data": null,
            "errors": [{ "message": "boom", "locations": [{ "line": 1, "column": 3 }], "trace": "x" }]
        }))
        .unwrap();
        assert!(response.has_errors());
        assert!(response.data.is_none());
    }
}
