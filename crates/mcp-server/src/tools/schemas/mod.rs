pub mod capabilities;
pub mod explore_schema;
pub mod find_entity_path;
pub mod graphql;
pub mod refresh_schema;
pub mod validate_query;
