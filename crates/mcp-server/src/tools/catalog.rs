use super::HubService;
use serde_json::json;

pub const SERVER_NAME: &str = "hub-mcp";

pub const TOOL_NAMES: &[&str] = &[
    "capabilities",
    "explore_schema",
    "find_entity_path",
    "validate_query",
    "graphql_query",
    "graphql_mutate",
    "refresh_schema",
];

pub const INSTRUCTIONS: &str = "GraphQL schema hub. Call capabilities first, then explore_schema \
to find types, find_entity_path to connect entities, validate_query before graphql_query. \
Destructive mutations need confirm=true.";

/// Tool names, descriptions and input schemas as JSON, for `--print-tools`
pub fn tool_inventory_json(version: &str) -> String {
    let tools: Vec<serde_json::Value> = HubService::tools()
        .into_iter()
        .map(|tool| {
            json!({
                "name": tool.name,
                "description": tool.description,
                "input_schema": tool.input_schema,
            })
        })
        .collect();

    let payload = json!({
        "server": SERVER_NAME,
        "version": version,
        "tools": tools,
    });
    serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inventory_lists_every_tool() {
        let inventory: serde_json::Value =
            serde_json::from_str(&tool_inventory_json("0.0.0")).unwrap();
        assert_eq!(inventory["server"], SERVER_NAME);
        assert_eq!(
            inventory["tools"].as_array().map(Vec::len),
            Some(TOOL_NAMES.len())
        );
        assert!(inventory["tools"]
            .as_array()
            .unwrap()
            .iter()
            .all(|tool| tool["description"].is_string()));
    }
}
