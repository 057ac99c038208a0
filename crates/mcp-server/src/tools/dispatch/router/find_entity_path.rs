use super::super::{CallToolResult, Content, FindEntityPathRequest, HubService, McpError};
use crate::tools::schemas::find_entity_path::{EntityPath, FindEntityPathResult};
use crate::tools::templates;
use hub_graph::{RelationshipPath, DEFAULT_PATH_DEPTH, MAX_PATH_DEPTH};

use super::error::{invalid_request, schema_unavailable, unknown_type};

/// Breadth-first relationship paths between two entity types.
pub(in crate::tools::dispatch) async fn find_entity_path(
    service: &HubService,
    request: FindEntityPathRequest,
) -> Result<CallToolResult, McpError> {
    let from = request.from_type.trim();
    let to = request.to_type.trim();
    if from.is_empty() || to.is_empty() {
        return Ok(invalid_request("Both from_type and to_type are required"));
    }
    let max_depth = request
        .max_depth
        .unwrap_or(DEFAULT_PATH_DEPTH)
        .min(MAX_PATH_DEPTH);

    let schema = match service.schema().get_schema().await {
        Ok(schema) => schema,
        Err(e) => return Ok(schema_unavailable(&e)),
    };
    for name in [from, to] {
        if !schema.snapshot().contains(name) {
            return Ok(unknown_type(name, schema.similar_types(name)));
        }
    }

    let paths = schema.graph().find_paths(from, to, max_depth);
    log::debug!("{} path(s) from {from} to {to} within {max_depth}", paths.len());

    let result = if paths.is_empty() {
        no_path(from, to, max_depth)
    } else {
        FindEntityPathResult {
            from_type: from.to_string(),
            to_type: to.to_string(),
            max_depth,
            paths_found: paths.len(),
            paths: paths
                .iter()
                .enumerate()
                .map(|(i, path)| describe_path(i + 1, from, path))
                .collect(),
            message: None,
            suggestions: Vec::new(),
        }
    };

    Ok(CallToolResult::success(vec![Content::text(
        hub_protocol::serialize_json(&result).unwrap_or_default(),
    )]))
}

fn describe_path(number: usize, from: &str, path: &RelationshipPath) -> EntityPath {
    let mut traversal = Vec::with_capacity(path.len() + 1);
    traversal.push(from.to_string());
    traversal.extend(
        path.iter()
            .map(|hop| format!("  --[{}]--> {}", hop.field_name, hop.target_entity)),
    );

    EntityPath {
        path_number: number,
        steps: path.len(),
        traversal,
        query_template: templates::path_query_template(from, path),
    }
}

fn no_path(from: &str, to: &str, max_depth: usize) -> FindEntityPathResult {
    FindEntityPathResult {
        from_type: from.to_string(),
        to_type: to.to_string(),
        max_depth,
        paths_found: 0,
        paths: Vec::new(),
        message: Some(format!(
            "No path found between {from} and {to} within {max_depth} steps."
        )),
        suggestions: vec![
            format!("Try increasing max_depth (current: {max_depth}, max: {MAX_PATH_DEPTH})"),
            "Verify both types are entity types (should start with Entity_Tanzu_)".to_string(),
            "Use explore_schema with show_relationships=true to check available relationships for each type"
                .to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_graph::{Direction, EntityRelationship};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_traversal_lines() {
        let path = vec![EntityRelationship {
            source_entity: "Entity_Tanzu_TAS_Space_Type".to_string(),
            target_entity: "Entity_Tanzu_TAS_Organization_Type".to_string(),
            relationship_type: "isContainedIn".to_string(),
            direction: Direction::Out,
            field_name: "relationshipsOut.isContainedIn".to_string(),
        }];
        let described = describe_path(1, "Entity_Tanzu_TAS_Space_Type", &path);

        assert_eq!(described.steps, 1);
        assert_eq!(
            described.traversal,
            [
                "Entity_Tanzu_TAS_Space_Type",
                "  --[relationshipsOut.isContainedIn]--> Entity_Tanzu_TAS_Organization_Type",
            ]
        );
        assert!(described
            .query_template
            .contains("... on Entity_Tanzu_TAS_Organization_Type {"));
    }

    #[test]
    fn test_no_path_message() {
        let result = no_path("A", "B", 2);
        assert_eq!(result.paths_found, 0);
        assert_eq!(
            result.message.as_deref(),
            Some("No path found between A and B within 2 steps.")
        );
        assert_eq!(result.suggestions.len(), 3);
    }
}
