use rmcp::schemars;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ExploreSchemaRequest {
    /// Exact type name to describe
    #[schemars(
        description = "Specific type name to explore; entity types include the _Type suffix (e.g. Entity_Tanzu_TAS_Application_Type)"
    )]
    pub type_name: Option<String>,

    /// Free-text filter
    #[schemars(description = "Search types by concept in name or description (e.g. 'vulnerability')")]
    pub search: Option<String>,

    #[schemars(
        description = "Filter by domain: TAS, Spring, Observability, Security, Capacity, Fleet, Insights"
    )]
    pub domain: Option<String>,

    /// Type kind filter
    #[schemars(description = "Filter by category: OBJECT, INPUT_OBJECT, ENUM, INTERFACE, SCALAR")]
    pub category: Option<String>,

    #[schemars(
        description = "Include relationship fields and derived entity relationships (default: false)"
    )]
    pub show_relationships: Option<bool>,

    #[schemars(description = "Mark commonly used fields such as id, name and status (default: false)")]
    pub show_common_fields: Option<bool>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct FieldSummary {
    pub name: String,
    /// SDL notation, e.g. `[String!]!`
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub common_field: bool,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct EnumValueSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct RelationshipSummary {
    pub direction: String,
    pub relationship_type: String,
    pub field_name: String,
    pub target_entity: String,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct TypeDetailsResult {
    pub name: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub possible_types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub input_fields: Vec<FieldSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_fields: Option<Vec<FieldSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Vec<RelationshipSummary>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<EnumValueSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_query: Option<String>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct TypeListItem {
    pub name: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub field_count: usize,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct TypeListResult {
    pub total_found: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    pub types: Vec<TypeListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
