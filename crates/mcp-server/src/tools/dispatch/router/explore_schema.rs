use super::super::{CallToolResult, Content, ExploreSchemaRequest, HubService, McpError};
use crate::tools::schemas::explore_schema::{
    EnumValueSummary, FieldSummary, RelationshipSummary, TypeDetailsResult, TypeListItem,
    TypeListResult,
};
use crate::tools::templates;
use hub_schema::{FieldDefinition, InputValue, TypeDefinition};
use hub_schema_cache::CachedSchema;
use hub_search::{search_types, TypeQuery, MAX_SEARCH_RESULTS};

use super::error::{schema_unavailable, unknown_type};

/// Field names most queries select; flagged with `show_common_fields`
const COMMON_FIELDS: &[&str] = &[
    "id",
    "name",
    "properties",
    "state",
    "status",
    "createdAt",
    "updatedAt",
    "description",
    "version",
    "type",
    "severity",
    "score",
];

const LIST_DESCRIPTION_CHARS: usize = 100;

/// Describe one type, or list types matching the filters.
pub(in crate::tools::dispatch) async fn explore_schema(
    service: &HubService,
    request: ExploreSchemaRequest,
) -> Result<CallToolResult, McpError> {
    let schema = match service.schema().get_schema().await {
        Ok(schema) => schema,
        Err(e) => return Ok(schema_unavailable(&e)),
    };

    if let Some(name) = non_blank(request.type_name.as_deref()) {
        let Some(ty) = schema.type_details(name) else {
            return Ok(unknown_type(name, schema.similar_types(name)));
        };
        let result = describe_type(&schema, ty, &request);
        return Ok(CallToolResult::success(vec![Content::text(
            hub_protocol::serialize_json(&result).unwrap_or_default(),
        )]));
    }

    let result = list_types(&schema, &request);
    Ok(CallToolResult::success(vec![Content::text(
        hub_protocol::serialize_json(&result).unwrap_or_default(),
    )]))
}

fn describe_type(
    schema: &CachedSchema,
    ty: &TypeDefinition,
    request: &ExploreSchemaRequest,
) -> TypeDetailsResult {
    let show_relationships = request.show_relationships.unwrap_or(false);
    let show_common = request.show_common_fields.unwrap_or(false);

    let (relationship_fields, fields): (Vec<&FieldDefinition>, Vec<&FieldDefinition>) = ty
        .fields
        .iter()
        .partition(|field| is_relationship_field(&field.name));

    let relationships = show_relationships.then(|| {
        schema
            .graph()
            .relationships(&ty.name)
            .iter()
            .map(|rel| RelationshipSummary {
                direction: rel.direction.to_string(),
                relationship_type: rel.relationship_type.clone(),
                field_name: rel.field_name.clone(),
                target_entity: rel.target_entity.clone(),
            })
            .collect()
    });

    let is_entity = schema.graph().contains(&ty.name) || ty.name.starts_with("Entity_Tanzu_");

    TypeDetailsResult {
        name: ty.name.clone(),
        kind: ty.kind.to_string(),
        description: ty.description.clone(),
        interfaces: ty.interfaces.clone(),
        possible_types: ty.possible_types.clone(),
        fields: fields
            .into_iter()
            .map(|f| summarize_field(f, show_common))
            .collect(),
        input_fields: ty.input_fields.iter().map(summarize_input).collect(),
        relationship_fields: show_relationships.then(|| {
            relationship_fields
                .into_iter()
                .map(|f| summarize_field(f, false))
                .collect()
        }),
        relationships,
        enum_values: ty
            .enum_values
            .iter()
            .map(|value| EnumValueSummary {
                name: value.name.clone(),
                description: value.description.clone(),
                deprecated: value.is_deprecated,
                deprecation_reason: value.deprecation_reason.clone(),
            })
            .collect(),
        example_query: is_entity.then(|| templates::example_query(ty)),
    }
}

fn list_types(schema: &CachedSchema, request: &ExploreSchemaRequest) -> TypeListResult {
    let search = non_blank(request.search.as_deref());
    let domain = non_blank(request.domain.as_deref());
    let query = TypeQuery {
        term: search,
        domain,
        kind: non_blank(request.category.as_deref()),
    };

    let found = search_types(schema.snapshot(), &query);
    let note = (found.len() == MAX_SEARCH_RESULTS).then(|| {
        format!(
            "Results limited to {MAX_SEARCH_RESULTS} types. Use more specific search terms or filters to narrow results."
        )
    });

    TypeListResult {
        total_found: found.len(),
        domain: domain.map(str::to_string),
        search_term: search.map(str::to_string),
        types: found
            .into_iter()
            .map(|ty| TypeListItem {
                name: ty.name.clone(),
                kind: ty.kind.to_string(),
                description: ty.description.as_deref().map(shorten),
                field_count: ty.fields.len(),
            })
            .collect(),
        note,
    }
}

fn summarize_field(field: &FieldDefinition, show_common: bool) -> FieldSummary {
    FieldSummary {
        name: field.name.clone(),
        type_ref: field.ty.to_string(),
        description: field.description.clone(),
        arguments: field
            .args
            .iter()
            .map(|arg| format!("{}: {}", arg.name, arg.ty))
            .collect(),
        deprecated: field.is_deprecated,
        deprecation_reason: field.deprecation_reason.clone(),
        common_field: show_common && COMMON_FIELDS.contains(&field.name.as_str()),
    }
}

fn summarize_input(input: &InputValue) -> FieldSummary {
    FieldSummary {
        name: input.name.clone(),
        type_ref: input.ty.to_string(),
        description: input.description.clone(),
        arguments: Vec::new(),
        deprecated: false,
        deprecation_reason: None,
        common_field: false,
    }
}

fn is_relationship_field(name: &str) -> bool {
    matches!(name, "relationshipsIn" | "relationshipsOut")
        || name.ends_with("_RelIn")
        || name.ends_with("_RelOut")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn shorten(description: &str) -> String {
    match description.char_indices().nth(LIST_DESCRIPTION_CHARS) {
        Some((cut, _)) => format!("{}...", &description[..cut]),
        None => description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_relationship_fields() {
        assert!(is_relationship_field("relationshipsOut"));
        assert!(is_relationship_field("Space_RelIn"));
        assert!(!is_relationship_field("relationships"));
        assert!(!is_relationship_field("id"));
    }

    #[test]
    fn test_shorten_keeps_char_boundaries() {
        assert_eq!(shorten("short"), "short");

        let long = "é".repeat(120);
        let short = shorten(&long);
        assert_eq!(short.chars().count(), LIST_DESCRIPTION_CHARS + 3);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  TAS ")), Some("TAS"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
