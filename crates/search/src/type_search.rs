use crate::error::SearchError;
use hub_schema::{SchemaSnapshot, TypeDefinition};
use serde::Serialize;
use std::str::FromStr;

/// Results are capped to keep tool responses small
pub const MAX_SEARCH_RESULTS: usize = 20;

/// Product areas of the upstream schema, recognised by a name fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Domain {
    Tas,
    Spring,
    Observability,
    Security,
    Capacity,
    Fleet,
    Insights,
}

impl Domain {
    pub const ALL: [Self; 7] = [
        Self::Tas,
        Self::Spring,
        Self::Observability,
        Self::Security,
        Self::Capacity,
        Self::Fleet,
        Self::Insights,
    ];

    /// Fragment a type name must contain to belong to the domain
    #[must_use]
    pub const fn name_fragment(self) -> &'static str {
        match self {
            Self::Tas => "Tanzu_TAS",
            Self::Spring => "Tanzu_Spring",
            Self::Observability => "Observability",
            Self::Security => "Vulnerability",
            Self::Capacity => "Capacity",
            Self::Fleet => "FleetManagement",
            Self::Insights => "Insight",
        }
    }

    #[must_use]
    pub fn matches(self, type_name: &str) -> bool {
        type_name.contains(self.name_fragment())
    }
}

impl FromStr for Domain {
    type Err = SearchError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "TAS" => Ok(Self::Tas),
            "SPRING" => Ok(Self::Spring),
            "OBSERVABILITY" => Ok(Self::Observability),
            "SECURITY" => Ok(Self::Security),
            "CAPACITY" => Ok(Self::Capacity),
            "FLEET" => Ok(Self::Fleet),
            "INSIGHTS" => Ok(Self::Insights),
            _ => Err(SearchError::UnknownDomain(raw.to_string())),
        }
    }
}

/// Filters for [`search_types`]; blank values disable a filter
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeQuery<'a> {
    /// Case-insensitive substring of the name or description
    pub term: Option<&'a str>,
    /// Domain name (TAS, Spring, ...). Unknown domains do not filter.
    pub domain: Option<&'a str>,
    /// Type kind (OBJECT, ENUM, ...), compared case-insensitively
    pub kind: Option<&'a str>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Types matching every filter, in declaration order, at most [`MAX_SEARCH_RESULTS`]
#[must_use]
pub fn search_types<'s>(schema: &'s SchemaSnapshot, query: &TypeQuery<'_>) -> Vec<&'s TypeDefinition> {
    let term = non_blank(query.term).map(str::to_lowercase);
    let domain = non_blank(query.domain).and_then(|raw| match raw.parse::<Domain>() {
        Ok(domain) => Some(domain),
        Err(e) => {
            log::debug!("{e}; domain filter ignored");
            None
        }
    });
    let kind = non_blank(query.kind);

    schema
        .types()
        .iter()
        .filter(|t| term.as_deref().map_or(true, |term| matches_term(t, term)))
        .filter(|t| domain.map_or(true, |d| d.matches(&t.name)))
        .filter(|t| kind.map_or(true, |k| t.kind.as_str().eq_ignore_ascii_case(k)))
        .take(MAX_SEARCH_RESULTS)
        .collect()
}

/// Every type of a domain, uncapped
#[must_use]
pub fn types_by_domain(schema: &SchemaSnapshot, domain: Domain) -> Vec<&TypeDefinition> {
    schema
        .types()
        .iter()
        .filter(|t| domain.matches(&t.name))
        .collect()
}

fn matches_term(ty: &TypeDefinition, lowered_term: &str) -> bool {
    ty.name.to_lowercase().contains(lowered_term)
        || ty
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(lowered_term))
}
