pub(super) mod capabilities;
mod error;
pub(super) mod explore_schema;
pub(super) mod find_entity_path;
pub(super) mod graphql_mutate;
pub(super) mod graphql_query;
pub(super) mod refresh_schema;
pub(super) mod validate_query;
